//! Mapping of store errors onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::response::{MessageResponse, ValidationResponse};
use crate::Error;

/// Message returned for every backend failure. Details stay in the logs.
pub(super) const INTERNAL_ERROR_MESSAGE: &str = "Internal error";

/// Error response wrapper for converting [`Error`] to HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            Error::InvalidInput(message) => {
                (StatusCode::BAD_REQUEST, Json(MessageResponse::new(message))).into_response()
            }
            Error::ValidationFailed(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationResponse::new(errors)),
            )
                .into_response(),
            err @ (Error::BackendUnavailable(_)
            | Error::ReadFailed { .. }
            | Error::WriteFailed { .. }
            | Error::Encoding(_)) => {
                tracing::error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(MessageResponse::new(INTERNAL_ERROR_MESSAGE)),
                )
                    .into_response()
            }
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}
