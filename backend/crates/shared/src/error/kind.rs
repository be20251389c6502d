//! Error Kind
//!
//! Classification shared by the auth and post error enums; each kind maps to
//! exactly one HTTP status.

use serde::Serialize;
use std::fmt;

/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::PayloadTooLarge.status_code(), 413);
/// assert_eq!(ErrorKind::Gone.reason(), "Gone");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Malformed form, JSON or multipart input
    BadRequest,
    /// Wrong credentials or verification code, missing session
    Unauthorized,
    /// Account not activated
    Forbidden,
    /// Unknown post, image or token
    NotFound,
    /// Email already registered
    Conflict,
    /// Expired code, dropped table
    Gone,
    /// Upload over the configured limit
    PayloadTooLarge,
    InternalServerError,
    /// Mail transport down
    ServiceUnavailable,
}

impl ErrorKind {
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::Gone => 410,
            ErrorKind::PayloadTooLarge => 413,
            ErrorKind::InternalServerError => 500,
            ErrorKind::ServiceUnavailable => 503,
        }
    }

    /// Reason phrase of the status
    pub const fn reason(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::Gone => "Gone",
            ErrorKind::PayloadTooLarge => "Payload Too Large",
            ErrorKind::InternalServerError => "Internal Server Error",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// Server-side faults; their details never reach the client.
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    #[cfg(feature = "axum")]
    pub fn http_status(&self) -> http::StatusCode {
        http::StatusCode::from_u16(self.status_code())
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors() {
        assert!(ErrorKind::InternalServerError.is_server_error());
        assert!(ErrorKind::ServiceUnavailable.is_server_error());
        assert!(!ErrorKind::Gone.is_server_error());
        assert!(!ErrorKind::PayloadTooLarge.is_server_error());
    }

    #[test]
    fn test_display_and_serialization() {
        assert_eq!(ErrorKind::NotFound.to_string(), "Not Found");
        assert_eq!(
            serde_json::to_string(&ErrorKind::PayloadTooLarge).unwrap(),
            r#""PAYLOAD_TOO_LARGE""#
        );
    }
}
