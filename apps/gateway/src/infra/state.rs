use std::sync::Arc;

use tracing::warn;

use crate::config::gateway::GatewayConfig;
use crate::error::AppError;
use crate::services::users::{InMemoryUserDirectory, UserDirectory};
use crate::services::widgets_client::{HttpWidgetSource, StaticWidgetSource, WidgetSource};
use crate::state::app_state::{AppState, DEFAULT_MAX_JSON_PAYLOAD_SIZE};
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
///
/// Unset collaborators default to empty in-memory ones: no user can log in
/// and every user owns no widgets. Without a config or explicit security the
/// signing key is ephemeral.
pub struct StateBuilder {
    security_config: SecurityConfig,
    users: Option<Arc<dyn UserDirectory>>,
    widgets: Option<Arc<dyn WidgetSource>>,
    config: Option<GatewayConfig>,
    max_json_payload_size: usize,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::ephemeral(),
            users: None,
            widgets: None,
            config: None,
            max_json_payload_size: DEFAULT_MAX_JSON_PAYLOAD_SIZE,
        }
    }

    /// Derive security, user directory and widget client from process config.
    ///
    /// Explicit `with_users` / `with_widget_source` calls still take precedence.
    pub fn with_config(mut self, config: &GatewayConfig) -> Self {
        self.security_config = SecurityConfig::from_config(config);
        self.max_json_payload_size = config.max_json_payload_size;
        self.config = Some(config.clone());
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_users(mut self, users: impl UserDirectory + 'static) -> Self {
        self.users = Some(Arc::new(users));
        self
    }

    pub fn with_widget_source(mut self, widgets: impl WidgetSource + 'static) -> Self {
        self.widgets = Some(Arc::new(widgets));
        self
    }

    pub fn with_max_json_payload_size(mut self, limit: usize) -> Self {
        self.max_json_payload_size = limit;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let users: Arc<dyn UserDirectory> = match (self.users, &self.config) {
            (Some(users), _) => users,
            (None, Some(GatewayConfig { users_file: Some(path), .. })) => {
                let directory = InMemoryUserDirectory::from_json_file(path)?;
                if directory.is_empty() {
                    warn!(path = %path.display(), "Users file has no entries; every login will fail");
                }
                Arc::new(directory)
            }
            (None, Some(_)) => {
                warn!("GATEWAY_USERS_FILE not set; user directory is empty and every login will fail");
                Arc::new(InMemoryUserDirectory::default())
            }
            (None, None) => Arc::new(InMemoryUserDirectory::default()),
        };

        let widgets: Arc<dyn WidgetSource> = match (self.widgets, &self.config) {
            (Some(widgets), _) => widgets,
            (None, Some(config)) => Arc::new(HttpWidgetSource::new(&config.widgets_api)?),
            (None, None) => Arc::new(StaticWidgetSource::new()),
        };

        Ok(AppState::new(self.security_config, users, widgets)
            .with_max_json_payload_size(self.max_json_payload_size))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
