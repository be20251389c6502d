//! Application Error
//!
//! Domain crates keep their own `thiserror` enums and convert into
//! [`AppError`] at the HTTP edge, where it renders as RFC 7807 problem
//! details.

use serde::Serialize;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

pub type AppResult<T> = Result<T, AppError>;

/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::NotFound, "Post not found");
/// assert_eq!(err.status_code(), 404);
/// assert_eq!(err.problem().detail, "Post not found");
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// RFC 7807 body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_url: String,
    pub title: &'static str,
    pub status: u16,
    pub detail: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Keep the underlying error for logs
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn problem(&self) -> ProblemDetails {
        ProblemDetails {
            type_url: format!("https://httpstatuses.io/{}", self.status_code()),
            title: self.kind.reason(),
            status: self.status_code(),
            detail: self.message.to_string(),
        }
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_details() {
        let problem = AppError::new(ErrorKind::Conflict, "Email is already registered").problem();
        assert_eq!(problem.status, 409);
        assert_eq!(problem.title, "Conflict");
        assert_eq!(problem.type_url, "https://httpstatuses.io/409");

        let json = serde_json::to_value(&problem).unwrap();
        assert_eq!(json["type"], "https://httpstatuses.io/409");
        assert_eq!(json["detail"], "Email is already registered");
    }

    #[test]
    fn test_display() {
        let err = AppError::new(ErrorKind::NotFound, "Post not found");
        assert_eq!(err.to_string(), "[Not Found] Post not found");
    }

    #[test]
    fn test_source_is_kept() {
        let io_err = std::io::Error::other("disk full");
        let err = AppError::new(ErrorKind::InternalServerError, "Upload failed").with_source(io_err);
        assert_eq!(err.source().unwrap().to_string(), "disk full");
        assert!(err.kind().is_server_error());
    }
}
