//! Error codes for the gateway API.
//!
//! Every `AppError` maps to exactly one code here. Codes are
//! SCREAMING_SNAKE_CASE and are what the structured logs carry next to the
//! trace id; the response body itself only carries the human message.

use core::fmt;

/// Centralized error codes for the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// No Authorization header on a protected route
    MissingToken,
    /// Authorization header present but the token did not verify
    InvalidToken,
    /// Login email not known to the user directory
    LoginFailed,
    /// Token is valid but lacks the scope the route requires
    InsufficientScope,

    // Request Validation
    /// Request body is not the expected JSON shape
    InvalidBody,
    /// A date filter bound could not be parsed
    InvalidDateFilter,
    /// Query string could not be decoded
    InvalidQuery,

    // Upstream
    /// Widget service unreachable, failed, or returned an unusable payload
    UpstreamUnavailable,
    /// Widget service did not answer within the configured timeout
    UpstreamTimeout,

    // System Errors
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::LoginFailed => "LOGIN_FAILED",
            Self::InsufficientScope => "INSUFFICIENT_SCOPE",

            Self::InvalidBody => "INVALID_BODY",
            Self::InvalidDateFilter => "INVALID_DATE_FILTER",
            Self::InvalidQuery => "INVALID_QUERY",

            Self::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            Self::UpstreamTimeout => "UPSTREAM_TIMEOUT",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
