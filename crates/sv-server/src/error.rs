//! Error-to-HTTP response conversion.
//!
//! Wraps [`sv_core::Error`] so route handlers can return
//! `Result<T, AppError>` and get a JSON error body with the matching status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError {
    inner: sv_core::Error,
    request_id: Option<String>,
}

impl AppError {
    pub fn new(inner: sv_core::Error) -> Self {
        Self {
            inner,
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, id: String) -> Self {
        self.request_id = Some(id);
        self
    }
}

impl From<sv_core::Error> for AppError {
    fn from(e: sv_core::Error) -> Self {
        Self::new(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                "Server error in API handler"
            );
        }

        let code = match &self.inner {
            sv_core::Error::NotFound { .. } => "not_found",
            sv_core::Error::MalformedScene { .. } => "malformed_scene",
            sv_core::Error::Catalog(_) => "catalog_error",
            sv_core::Error::Validation(_) => "validation_error",
            sv_core::Error::Io { .. } => "io_error",
            sv_core::Error::Internal(_) => "internal_error",
        };

        let body = json!({
            "error": self.inner.to_string(),
            "code": code,
            "request_id": self.request_id,
        });

        (status, axum::Json(body)).into_response()
    }
}
