//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Handlers split errors in two groups with [`AuthError::is_user_facing`]:
//! failures the visitor can fix are shown as a flash message, everything
//! else propagates and renders as a problem response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordPolicyError};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Account still waiting for activation
    #[error("Account is not activated")]
    InactiveAccount,

    #[error("Email is already registered")]
    EmailTaken,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Password rejected: {0}")]
    WeakPassword(#[from] PasswordPolicyError),

    /// Activation or reset token unknown or already used
    #[error("Invalid or used token")]
    InvalidToken,

    /// One-time code or verification code does not match
    #[error("Incorrect verification code")]
    InvalidOtp,

    #[error("Verification code expired")]
    OtpExpired,

    /// Session cookie missing, forged or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Mail delivery failure
    #[error("Mail delivery failed: {0}")]
    Mail(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] PasswordHashError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        self.kind().http_status()
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::SessionInvalid
            | AuthError::InvalidOtp => ErrorKind::Unauthorized,
            AuthError::InactiveAccount => ErrorKind::Forbidden,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidEmail | AuthError::WeakPassword(_) => ErrorKind::BadRequest,
            AuthError::InvalidToken => ErrorKind::NotFound,
            AuthError::OtpExpired => ErrorKind::Gone,
            AuthError::Mail(_) => ErrorKind::ServiceUnavailable,
            AuthError::PasswordHash(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Whether the visitor should see this error as a flash message.
    ///
    /// Everything else is a fault on our side and propagates.
    pub fn is_user_facing(&self) -> bool {
        self.message_key().is_some()
    }

    /// Translation key of the flash message for user-facing errors
    pub fn message_key(&self) -> Option<&'static str> {
        let key = match self {
            AuthError::InvalidCredentials => "exception.incorrect_auth_credentials",
            AuthError::InactiveAccount => "exception.inactive_account",
            AuthError::EmailTaken => "exception.email_taken",
            AuthError::InvalidEmail => "exception.invalid_email",
            AuthError::WeakPassword(_) => "exception.weak_password",
            AuthError::InvalidToken => "exception.invalid_token",
            AuthError::InvalidOtp => "exception.incorrect_verification_code",
            AuthError::OtpExpired => "exception.verification_code_expired",
            AuthError::SessionInvalid
            | AuthError::Mail(_)
            | AuthError::PasswordHash(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => return None,
        };
        Some(key)
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::PasswordHash(e) => {
                tracing::error!(error = %e, "Password hashing error");
            }
            AuthError::Mail(msg) => {
                tracing::error!(message = %msg, "Auth mail delivery error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidOtp => {
                tracing::warn!("Invalid verification code submitted");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.to_app_error().with_source(err)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        if self.kind().is_server_error() {
            return AppError::new(self.kind(), "Internal server error").into_response();
        }
        self.to_app_error().into_response()
    }
}
