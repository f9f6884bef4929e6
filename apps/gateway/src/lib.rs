#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod web;

// Re-exports for public API
pub use auth::claims::{Claims, WIDGETS_SCOPE};
pub use auth::jwt::{mint_access_token, verify_access_token};
pub use config::gateway::{GatewayConfig, LogFormat};
pub use domain::Widget;
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::auth_claims::BearerClaims;
pub use infra::state::build_state;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use services::users::{InMemoryUserDirectory, UserDirectory, UserLookup, UserRecord};
pub use services::widgets_client::{HttpWidgetSource, StaticWidgetSource, WidgetSource};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    gateway_test_support::logging::init();
}
