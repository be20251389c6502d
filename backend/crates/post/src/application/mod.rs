//! Application Layer

pub mod config;
pub mod service;

pub use config::PostConfig;
pub use service::PostService;
