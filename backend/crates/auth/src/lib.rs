//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and mail ports
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL and in-memory stores, mailers
//! - `presentation/` - Server-rendered pages, form handlers, router
//!
//! ## Features
//! - Sign up with email + password, activation link by mail
//! - Sign in with "Remember me", optional two-step verification by mailed code
//! - Password reset by mailed link
//! - Server-side sessions referenced by an HMAC-signed cookie
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional application-wide pepper
//! - Unknown emails and wrong passwords are indistinguishable to the visitor
//! - A password reset signs the account out everywhere

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::{
    ActivateUseCase, CheckSessionUseCase, OtpUseCase, PasswordResetUseCase, SignInInput,
    SignInOutcome, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase, VerifiedSession,
};
pub use domain::{
    AuthSession, AuthSessionRepository, AuthStore, MailKind, MailMessage, Mailer, SharedMailer,
    User, UserRepository,
};
pub use error::{AuthError, AuthResult};
pub use infra::{MemoryAuthRepository, MemoryMailer, PgAuthRepository, TracingMailer};
pub use presentation::{AuthAppState, auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
