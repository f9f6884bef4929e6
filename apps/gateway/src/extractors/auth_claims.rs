use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};

use crate::auth::claims::Claims;
use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;
use crate::web::request_facts::AuthenticatedUser;

/// Verified token claims taken from the `Authorization` header.
///
/// - header absent → `MissingToken`
/// - anything else that does not verify → `InvalidToken`
#[derive(Debug, Clone)]
pub struct BearerClaims(pub Claims);

impl BearerClaims {
    pub fn into_inner(self) -> Claims {
        self.0
    }
}

impl Deref for BearerClaims {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Token part of an `Authorization` header value.
///
/// A leading `Bearer` scheme (any case) is stripped. A value without the
/// scheme is taken to be the bare token, which is what clients of the
/// earlier header-as-token behaviour send.
pub fn bearer_token(header_value: &str) -> &str {
    let trimmed = header_value.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ if trimmed.eq_ignore_ascii_case("bearer") => "",
        _ => trimmed,
    }
}

impl FromRequest for BearerClaims {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .ok_or_else(AppError::missing_token)?;

            let auth_value = auth_header.to_str().map_err(|_| {
                security::token_rejected("non_ascii_header");
                AppError::invalid_token("non_ascii_header")
            })?;

            let token = bearer_token(auth_value);
            if token.is_empty() {
                security::token_rejected("empty_token");
                return Err(AppError::invalid_token("empty_token"));
            }

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not found"))?;

            let claims = verify_access_token(token, &app_state.security).inspect_err(|e| {
                if let AppError::InvalidToken { reason } = e {
                    security::token_rejected(reason);
                }
            })?;

            req.extensions_mut().insert(AuthenticatedUser(claims.sub));
            Ok(BearerClaims(claims))
        })
    }
}
