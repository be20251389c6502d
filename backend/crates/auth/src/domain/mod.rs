//! Domain Layer
//!
//! Contains entities, value objects, the mail port and repository traits.

pub mod entity;
pub mod mail;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{auth_session::AuthSession, user::User};
pub use mail::{MailKind, MailMessage, Mailer, SharedMailer};
pub use repository::{AuthSessionRepository, AuthStore, UserRepository};
