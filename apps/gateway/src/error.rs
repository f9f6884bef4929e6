use actix_web::error::ResponseError;
use actix_web::http::{header, StatusCode};
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::errors::ErrorCode;
use crate::web::trace_ctx;

/// Wire shape of every error response: `{"Error": "<message>"}`.
#[derive(Serialize)]
pub struct ErrorBody {
    #[serde(rename = "Error")]
    pub error: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing authorization token")]
    MissingToken,
    /// `reason` is a short machine tag for logs (e.g. `token_expired`).
    #[error("Invalid authorization token")]
    InvalidToken { reason: &'static str },
    #[error("Unable to login")]
    LoginFailed,
    #[error("User does not have {scope} scope")]
    InsufficientScope { scope: &'static str },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Upstream unavailable: {detail}")]
    UpstreamUnavailable { detail: String },
    #[error("Upstream timeout: {detail}")]
    UpstreamTimeout { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::MissingToken => ErrorCode::MissingToken,
            AppError::InvalidToken { .. } => ErrorCode::InvalidToken,
            AppError::LoginFailed => ErrorCode::LoginFailed,
            AppError::InsufficientScope { .. } => ErrorCode::InsufficientScope,
            AppError::BadRequest { code, .. } => *code,
            AppError::UpstreamUnavailable { .. } => ErrorCode::UpstreamUnavailable,
            AppError::UpstreamTimeout { .. } => ErrorCode::UpstreamTimeout,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Client-facing message placed in the `Error` field.
    ///
    /// Server-side failures never leak their detail; it goes to the log instead.
    pub fn message(&self) -> String {
        match self {
            AppError::BadRequest { detail, .. } => detail.clone(),
            AppError::UpstreamUnavailable { .. } => "Widget service unavailable".to_string(),
            AppError::UpstreamTimeout { .. } => "Widget service timed out".to_string(),
            AppError::Internal { .. } | AppError::Config { .. } => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingToken => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken { .. } => StatusCode::UNAUTHORIZED,
            AppError::LoginFailed => StatusCode::UNAUTHORIZED,
            AppError::InsufficientScope { .. } => StatusCode::UNAUTHORIZED,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
            AppError::UpstreamTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn missing_token() -> Self {
        Self::MissingToken
    }

    pub fn invalid_token(reason: &'static str) -> Self {
        Self::InvalidToken { reason }
    }

    pub fn login_failed() -> Self {
        Self::LoginFailed
    }

    pub fn insufficient_scope(scope: &'static str) -> Self {
        Self::InsufficientScope { scope }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn upstream_unavailable(detail: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            detail: detail.into(),
        }
    }

    pub fn upstream_timeout(detail: impl Into<String>) -> Self {
        Self::UpstreamTimeout {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AppError::upstream_timeout(e.to_string())
        } else if e.is_decode() {
            AppError::upstream_unavailable(format!("invalid widget payload: {e}"))
        } else {
            AppError::upstream_unavailable(e.to_string())
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            error!(%trace_id, code = %code, error = %self, "request failed");
        } else {
            warn!(%trace_id, code = %code, "request rejected");
        }

        let mut builder = HttpResponse::build(status);
        builder.insert_header(("x-trace-id", trace_id));
        if status == StatusCode::UNAUTHORIZED {
            builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
        }

        builder.json(ErrorBody {
            error: self.message(),
        })
    }
}
