use std::collections::BTreeMap;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::domain::error::BoardError;

const INVALID_REQUEST_MESSAGE: &str = "Invalid request";
const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Request body is too large";

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] BoardError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("request body exceeds the configured limit")]
    PayloadTooLarge,
}

pub(crate) type AppResult<T> = Result<T, AppError>;

/// Error envelope returned for every non-2xx answer.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// HTTP status code as a string, e.g. `"404"`.
    pub(crate) code: String,
    pub(crate) message: String,
    /// Field name to violation message. Empty unless request validation failed.
    pub(crate) validation: BTreeMap<String, String>,
}

impl ErrorResponse {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16().to_string(),
            message: message.into(),
            validation: BTreeMap::new(),
        }
    }

    fn add_validation(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.validation.insert(field.into(), message.into());
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        // a streamed body over the limit fails while buffering, not before the handler
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge;
        }
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Domain(err) => {
                let status = StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let message = match &err {
                    BoardError::PostNotFound => err.to_string(),
                    BoardError::Unexpected(detail) => {
                        error!(%detail, "request failed on storage error");
                        "internal error".to_string()
                    }
                };
                (status, ErrorResponse::new(status, message))
            }
            AppError::Validation(errors) => {
                let status = StatusCode::BAD_REQUEST;
                let mut body = ErrorResponse::new(status, INVALID_REQUEST_MESSAGE);
                for (field, field_errors) in errors.field_errors() {
                    let message = field_errors
                        .first()
                        .map(|err| {
                            err.message
                                .as_ref()
                                .map(|message| message.to_string())
                                .unwrap_or_else(|| err.code.to_string())
                        })
                        .unwrap_or_default();
                    body.add_validation(field.to_string(), message);
                }
                (status, body)
            }
            AppError::BadRequest(detail) => {
                let status = StatusCode::BAD_REQUEST;
                (status, ErrorResponse::new(status, detail))
            }
            AppError::PayloadTooLarge => {
                let status = StatusCode::PAYLOAD_TOO_LARGE;
                (status, ErrorResponse::new(status, PAYLOAD_TOO_LARGE_MESSAGE))
            }
        };

        (status, Json(body)).into_response()
    }
}
