//! One `request_completed` event per request.
//!
//! Besides method, path, status and latency the event carries what the
//! handler recorded in `RequestFacts`: the authenticated `user_id` and, for
//! listing requests, the widget service outcome and item count.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{event, Level};

use crate::web::request_facts::RequestFacts;

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

/// Server errors log at ERROR, client errors at WARN, the rest at INFO.
pub fn completion_level(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        // Path only; query strings carry filter values.
        let path = req.path().to_string();
        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, facts) = match &result {
                Ok(res) => (res.status(), RequestFacts::of(res.request())),
                Err(err) => (
                    err.as_response_error().status_code(),
                    RequestFacts::default(),
                ),
            };
            let duration_us = start.elapsed().as_micros() as u64;
            let upstream = facts.upstream.map(|outcome| outcome.as_str());
            let upstream_items = facts
                .upstream
                .and_then(|outcome| outcome.items())
                .map(|n| n as u64);

            macro_rules! completed {
                ($level:expr) => {
                    event!(
                        $level,
                        http.method = %method,
                        url.path = %path,
                        http.status_code = status.as_u16(),
                        duration_us,
                        trace_id = %trace_id,
                        user_id = facts.user_id,
                        upstream,
                        upstream_items,
                        "request_completed"
                    )
                };
            }

            let level = completion_level(status);
            if level == Level::ERROR {
                completed!(Level::ERROR);
            } else if level == Level::WARN {
                completed!(Level::WARN);
            } else {
                completed!(Level::INFO);
            }

            result
        })
    }
}
