use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::DEFAULT_MAX_JSON_PAYLOAD_SIZE;
use crate::state::AppState;

/// Client-facing message for any unreadable or mis-shaped body.
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// JSON body extractor whose failures render as the gateway's `{"Error": ...}`
/// shape (HTTP 400) instead of actix's default plain-text errors.
///
/// The body is parsed regardless of `Content-Type`. Its size is capped by
/// `AppState::max_json_payload_size`.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();
        let limit = req
            .app_data::<web::Data<AppState>>()
            .map(|state| state.max_json_payload_size)
            .unwrap_or(DEFAULT_MAX_JSON_PAYLOAD_SIZE);

        Box::pin(async move {
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(error = %e, "Failed to read request body chunk");
                    AppError::bad_request(ErrorCode::InvalidBody, INVALID_BODY_MESSAGE)
                })?;
                if body.len() + chunk.len() > limit {
                    warn!(limit, "Request body exceeds limit");
                    return Err(AppError::bad_request(
                        ErrorCode::InvalidBody,
                        INVALID_BODY_MESSAGE,
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            serde_json::from_slice::<T>(&body)
                .map(ValidatedJson)
                .map_err(|e| {
                    debug!(error = %e, "Rejected JSON body");
                    AppError::bad_request(ErrorCode::InvalidBody, INVALID_BODY_MESSAGE)
                })
        })
    }
}
