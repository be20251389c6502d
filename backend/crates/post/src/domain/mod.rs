//! Domain Layer
//!
//! Post entity, uploaded file value and the repository trait.

pub mod entity;
pub mod repository;
pub mod upload;

pub use entity::{Post, PostFields};
pub use repository::{LocalPostRepository, PostRepository};
pub use upload::UploadedFile;
