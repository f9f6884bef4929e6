use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::services::users::UserDirectory;
use crate::services::widgets_client::WidgetSource;

/// Default cap on JSON request bodies (1 MiB).
pub const DEFAULT_MAX_JSON_PAYLOAD_SIZE: usize = 1024 * 1024;

/// Application state shared by every worker. Immutable after start-up.
#[derive(Clone)]
pub struct AppState {
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Email → identity lookup used by `/login`
    pub users: Arc<dyn UserDirectory>,
    /// Downstream listing service used by `/widgets`
    pub widgets: Arc<dyn WidgetSource>,
    /// Upper bound for JSON request bodies, in bytes
    pub max_json_payload_size: usize,
}

impl AppState {
    pub fn new(
        security: SecurityConfig,
        users: Arc<dyn UserDirectory>,
        widgets: Arc<dyn WidgetSource>,
    ) -> Self {
        Self {
            security,
            users,
            widgets,
            max_json_payload_size: DEFAULT_MAX_JSON_PAYLOAD_SIZE,
        }
    }

    pub fn with_max_json_payload_size(mut self, limit: usize) -> Self {
        self.max_json_payload_size = limit;
        self
    }
}
