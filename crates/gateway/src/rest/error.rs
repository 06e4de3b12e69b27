use crate::error::FunctionError;
use crate::rest::dto::ErrorResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// API error type
///
/// Every function failure is reported as a 500 with the failure envelope;
/// callers tell failures apart by the message only.
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status: StatusCode,
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError {
            message: message.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FunctionError> for ApiError {
    fn from(err: FunctionError) -> Self {
        tracing::warn!(error = %err, "Function call failed");
        ApiError::internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.message));
        (self.status, body).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "API Error {}: {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}
