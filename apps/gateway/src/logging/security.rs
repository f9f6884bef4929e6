//! Security-relevant log events. Emails are always redacted.

use tracing::warn;

use crate::logging::pii::Redacted;
use crate::web::trace_ctx;

/// Login attempt with an email the directory does not know.
pub fn login_failed(reason: &str, email: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        email = %Redacted(email),
        reason,
        "Authentication failure"
    );
}

/// Bearer token that could not be verified.
pub fn token_rejected(reason: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        %trace_id,
        reason,
        "Token rejected"
    );
}

/// Valid token lacking the scope a route requires.
pub fn scope_denied(user_id: i64, scope: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_SCOPE_DENIED",
        %trace_id,
        user_id,
        scope,
        "Missing required scope"
    );
}
