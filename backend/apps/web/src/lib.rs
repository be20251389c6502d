//! Quantum web application: landing page, auth pages and the post API.

pub mod app;
pub mod config;
pub mod landing;

pub use app::build_router;
pub use config::AppConfig;
