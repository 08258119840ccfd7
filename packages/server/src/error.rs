use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::SubmitError;
use serde::Serialize;
use serde_json::Value;

use crate::rest::RestError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `NOT_FOUND`,
    /// `CONFIGURATION_ERROR`, `QUERY_ERROR`, `INTERNAL_ERROR`.
    #[schema(example = "NOT_FOUND")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Staff member not found")]
    pub error: String,
    /// Data service diagnostics. Omitted in production.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    /// The data service connection settings are missing.
    Misconfigured(String),
    /// The data service rejected or failed a query.
    Query {
        message: String,
        details: Option<Value>,
    },
    Internal(String),
}

impl AppError {
    /// Classify a data service failure. Query errors keep their message;
    /// transport and decoding failures become opaque internal errors.
    pub fn from_rest(err: RestError, expose_details: bool) -> Self {
        if err.is_query_error() {
            AppError::Query {
                details: if expose_details {
                    err.diagnostics()
                } else {
                    None
                },
                message: err.to_string(),
            }
        } else {
            AppError::Internal(err.to_string())
        }
    }

    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    error: msg,
                    details: None,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    error: msg,
                    details: None,
                },
            ),
            AppError::Misconfigured(detail) => {
                tracing::error!("Configuration error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "CONFIGURATION_ERROR",
                        error: "Server configuration error".into(),
                        details: None,
                    },
                )
            }
            AppError::Query { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    code: "QUERY_ERROR",
                    error: message,
                    details,
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        error: "An unexpected error occurred".into(),
                        details: None,
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Invalid(msg) => AppError::Validation(msg),
            missing @ SubmitError::NotFound(_) => AppError::NotFound(missing.to_string()),
            store @ SubmitError::Store(_) => {
                tracing::error!("Role write failed: {store}");
                AppError::Query {
                    message: store.to_string(),
                    details: None,
                }
            }
        }
    }
}
