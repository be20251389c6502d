//! Post Error Types
//!
//! Post-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type PostResult<T> = Result<T, PostError>;

#[derive(Debug, Error)]
pub enum PostError {
    /// Lookup by id found nothing
    #[error("Post not found")]
    NotFound,

    /// No post references the given image URL
    #[error("No post has the image '{0}'")]
    ImageNotFound(String),

    /// The posts table was dropped
    #[error("Posts table does not exist")]
    TableMissing,

    /// Multipart body missing the file or unreadable
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Upload exceeds {limit} bytes")]
    UploadTooLarge { limit: usize },

    /// Filesystem failure while writing an upload
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PostError {
    pub fn status_code(&self) -> StatusCode {
        self.kind().http_status()
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PostError::NotFound | PostError::ImageNotFound(_) => ErrorKind::NotFound,
            PostError::TableMissing => ErrorKind::Gone,
            PostError::InvalidUpload(_) => ErrorKind::BadRequest,
            PostError::UploadTooLarge { .. } => ErrorKind::PayloadTooLarge,
            PostError::Storage(_) | PostError::Database(_) | PostError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    fn log(&self) {
        match self {
            PostError::Database(e) => {
                tracing::error!(error = %e, "Post database error");
            }
            PostError::Storage(e) => {
                tracing::error!(error = %e, "Post upload storage error");
            }
            PostError::Internal(msg) => {
                tracing::error!(message = %msg, "Post internal error");
            }
            PostError::TableMissing => {
                tracing::warn!("Posts table accessed after drop");
            }
            _ => {
                tracing::debug!(error = %self, "Post error");
            }
        }
    }
}

impl From<PostError> for AppError {
    fn from(err: PostError) -> Self {
        err.to_app_error().with_source(err)
    }
}

impl IntoResponse for PostError {
    fn into_response(self) -> Response {
        self.log();
        // Storage/database details stay in the logs
        if self.kind().is_server_error() {
            return AppError::new(self.kind(), "Internal server error").into_response();
        }
        self.to_app_error().into_response()
    }
}
