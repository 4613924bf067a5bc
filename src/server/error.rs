//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::dsl::parsing::DecodeError;
use crate::dsl::types::SchemaViolation;

#[derive(Debug)]
pub enum ApiError {
    Undecodable(DecodeError),
    Invalid(SchemaViolation),
}

/// Body of a rejected submission. Violations add their path, reason and
/// the expected/actual kinds for type mismatches.
#[derive(Serialize)]
struct Rejection {
    valid: bool,
    error: String,
    #[serde(flatten)]
    violation: Option<SchemaViolation>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let rejection = match self {
            ApiError::Undecodable(error) => {
                tracing::debug!("Rejected undecodable pipeline: {}", error);
                Rejection {
                    valid: false,
                    error: error.to_string(),
                    violation: None,
                }
            }
            ApiError::Invalid(violation) => {
                tracing::debug!("Rejected pipeline: {}", violation);
                Rejection {
                    valid: false,
                    error: violation.to_string(),
                    violation: Some(violation),
                }
            }
        };

        (StatusCode::BAD_REQUEST, Json(rejection)).into_response()
    }
}

impl From<DecodeError> for ApiError {
    fn from(error: DecodeError) -> Self {
        ApiError::Undecodable(error)
    }
}

impl From<SchemaViolation> for ApiError {
    fn from(violation: SchemaViolation) -> Self {
        ApiError::Invalid(violation)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
