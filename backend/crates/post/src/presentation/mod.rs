//! Presentation Layer
//!
//! JSON handlers, DTOs and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::PostAppState;
pub use router::{post_router, post_router_generic};
