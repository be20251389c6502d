//! Presentation Layer
//!
//! Server-rendered pages, form handlers, flash cookie and router.

pub mod dto;
pub mod flash;
pub mod handlers;
pub mod router;
pub mod views;

pub use flash::{Flash, FlashKind};
pub use handlers::AuthAppState;
pub use router::{auth_router, auth_router_generic};
