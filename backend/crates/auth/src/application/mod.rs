//! Application Layer
//!
//! Use cases and application services.

pub mod activate;
pub mod check_session;
pub mod config;
pub mod password_reset;
pub mod session_token;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod verify_otp;

// Re-exports
pub use activate::ActivateUseCase;
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use password_reset::PasswordResetUseCase;
pub use sign_in::{SignInInput, SignInOutcome, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpUseCase};
pub use verify_otp::{OtpUseCase, VerifiedSession};
