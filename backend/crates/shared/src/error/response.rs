//! HTTP rendering of [`AppError`]

use axum::Json;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use super::app_error::AppError;

const PROBLEM_JSON: &str = "application/problem+json";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            self.kind().http_status(),
            [(header::CONTENT_TYPE, PROBLEM_JSON)],
            Json(self.problem()),
        )
            .into_response()
    }
}
