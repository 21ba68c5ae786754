//! HTTP rendering of `MonetizerError`.
//!
//! Handlers return `ApiResult<T>`; any error is caught at the request boundary and
//! answered with the status from `MonetizerError::status_code` and a JSON
//! `{ "error": code, "message": text }` body.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use monetizer_common::MonetizerError;
use monetizer_common::error::ErrorBody;

/// Return type of every fallible handler.
pub type ApiResult<T> = Result<T, ApiError>;

/// Request-boundary wrapper around the shared error type.
#[derive(Debug)]
pub struct ApiError(
    /// Error rendered into the response.
    pub MonetizerError,
);

impl From<MonetizerError> for ApiError {
    fn from(err: MonetizerError) -> Self {
        ApiError(err)
    }
}

// Malformed bodies and path parameters are caller errors and answer 400 with
// the same body as any other validation failure.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(MonetizerError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError(MonetizerError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }
        (status, Json(ErrorBody::from(&self.0))).into_response()
    }
}
