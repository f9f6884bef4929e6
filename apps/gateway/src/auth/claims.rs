//! Claims carried inside gateway-issued access tokens.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Scope that gates `GET /widgets`.
pub const WIDGETS_SCOPE: &str = "widgets";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User id from the user directory
    pub sub: i64,
    pub name: String,
    pub email: String,
    /// Capabilities granted to the bearer, as requested at login
    pub scope: Vec<String>,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl Claims {
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scope.iter().any(|s| s == scope)
    }

    /// Fails with `InsufficientScope` unless the token grants `scope`.
    pub fn require_scope(&self, scope: &'static str) -> Result<(), AppError> {
        if self.has_scope(scope) {
            Ok(())
        } else {
            Err(AppError::insufficient_scope(scope))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_with(scope: &[&str]) -> Claims {
        Claims {
            sub: 7,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            scope: scope.iter().map(|s| s.to_string()).collect(),
            exp: 0,
        }
    }

    #[test]
    fn test_require_scope() {
        assert!(claims_with(&["profile", "widgets"])
            .require_scope(WIDGETS_SCOPE)
            .is_ok());

        match claims_with(&["profile"]).require_scope(WIDGETS_SCOPE) {
            Err(AppError::InsufficientScope { scope }) => assert_eq!(scope, "widgets"),
            other => panic!("expected InsufficientScope, got {other:?}"),
        }
    }

    #[test]
    fn test_scope_match_is_exact() {
        assert!(!claims_with(&["Widgets", "widgets:read"]).has_scope(WIDGETS_SCOPE));
        assert!(!claims_with(&[]).has_scope(WIDGETS_SCOPE));
    }
}
