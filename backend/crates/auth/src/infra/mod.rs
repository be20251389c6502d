//! Infrastructure Layer
//!
//! Database implementations and mail delivery.

pub mod mailer;
pub mod memory;
pub mod postgres;

pub use mailer::{MemoryMailer, TracingMailer};
pub use memory::MemoryAuthRepository;
pub use postgres::PgAuthRepository;
