//! Post Resource Module
//!
//! CRUD and image attachment for the "post" resource.
//!
//! Clean Architecture structure:
//! - `domain/` - Post entity, uploaded file, repository trait
//! - `application/` - `PostService` and its configuration
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - JSON handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use application::{PostConfig, PostService};
pub use domain::{Post, PostFields, PostRepository, UploadedFile};
pub use error::{PostError, PostResult};
pub use infra::{MemoryPostRepository, PgPostRepository};
pub use presentation::router::post_router;
