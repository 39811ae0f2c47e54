//! HTTP error envelope and mapping from domain errors.
//!
//! Keep the domain free of transport concerns by translating
//! [`Error`](crate::domain::Error) into Actix responses here. Every error
//! body is the same envelope: `{"error": "<message>"}`.

use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde_json::json;
use tracing::error;

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TraceId;

/// Transport-level error carrying a domain error onto the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError(Error);

impl ApiError {
    /// The stable error code behind this response.
    pub fn code(&self) -> ErrorCode {
        self.0.code()
    }

    fn to_status_code(&self) -> StatusCode {
        match self.0.code() {
            ErrorCode::InvalidRequest | ErrorCode::InvalidTransition => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Timeout | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message shown to clients; upstream failures are redacted and the
    /// original message stays in the server log for operators.
    fn client_message(&self) -> &str {
        match self.0.code() {
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::Timeout => "upstream request timed out",
            _ => self.0.message(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.to_status_code()
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.0.code(), ErrorCode::InternalError | ErrorCode::Timeout) {
            error!(
                code = ?self.0.code(),
                trace_id = ?TraceId::current(),
                message = %self.0.message(),
                "request failed upstream"
            );
        }
        HttpResponse::build(self.status_code()).json(json!({ "error": self.client_message() }))
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Map body-deserialisation failures onto the standard envelope so clients
/// never see Actix's default error text.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::from(Error::invalid_request(format!("invalid request body: {err}"))).into()
}
