//! Basket API error types.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use basket_core::error::{BODY_PARSER_ERR_CODE, DomainError, PROCESSING_ERR_CODE};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required setting is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),

    /// Tracing or span exporter setup failed.
    #[error("telemetry error: {0}")]
    Telemetry(String),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable numeric error code.
    pub code: u32,
    /// Snake-case error kind.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer error that implements `IntoResponse`.
///
/// Every variant is answered with 400 Bad Request.
#[derive(Debug)]
pub enum ApiError {
    /// A failure reported by the orchestrator.
    Domain(DomainError),
    /// The request body could not be decoded.
    BodyParser(JsonRejection),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BodyParser(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self {
            Self::Domain(err) => ErrorBody {
                code: err.code(),
                error: err.kind(),
                message: err.public_message(),
            },
            Self::BodyParser(rejection) => {
                warn!(error = %rejection.body_text(), "could not parse request body");
                ErrorBody {
                    code: BODY_PARSER_ERR_CODE,
                    error: "body_parser_error",
                    message: "could not parse request body.".to_owned(),
                }
            }
        };

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Gives the bare 408 produced by the request timeout layer the JSON error
/// body. Every other response passes through untouched.
pub async fn timeout_error_body(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }

    warn!("request timed out");
    let body = ErrorBody {
        code: PROCESSING_ERR_CODE,
        error: "request_timeout",
        message: "request timed out.".to_owned(),
    };
    (StatusCode::REQUEST_TIMEOUT, Json(body)).into_response()
}
