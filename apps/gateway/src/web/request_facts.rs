//! Facts a handler learns about a request, kept in the request extensions so
//! `StructuredLogger` can put them on the completion event.

use actix_web::{HttpMessage, HttpRequest};

use crate::domain::Widget;
use crate::error::AppError;

/// User whose token authenticated the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub i64);

/// How the call to the widget service ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamOutcome {
    Fetched { items: usize },
    Unavailable,
    TimedOut,
}

impl UpstreamOutcome {
    pub fn of(result: &Result<Vec<Widget>, AppError>) -> Self {
        match result {
            Ok(widgets) => Self::Fetched {
                items: widgets.len(),
            },
            Err(AppError::UpstreamTimeout { .. }) => Self::TimedOut,
            Err(_) => Self::Unavailable,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetched { .. } => "ok",
            Self::Unavailable => "unavailable",
            Self::TimedOut => "timeout",
        }
    }

    pub fn items(&self) -> Option<usize> {
        match self {
            Self::Fetched { items } => Some(*items),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestFacts {
    pub user_id: Option<i64>,
    pub upstream: Option<UpstreamOutcome>,
}

impl RequestFacts {
    pub fn of(req: &HttpRequest) -> Self {
        let extensions = req.extensions();
        Self {
            user_id: extensions.get::<AuthenticatedUser>().map(|user| user.0),
            upstream: extensions.get::<UpstreamOutcome>().copied(),
        }
    }
}
