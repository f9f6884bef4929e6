//! Client for the downstream widget listing service.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use tracing::{debug, warn};

use crate::config::gateway::WidgetsApiConfig;
use crate::domain::Widget;
use crate::error::AppError;

/// Source of the full widget list owned by a user.
#[async_trait]
pub trait WidgetSource: Send + Sync {
    async fn fetch_widgets(&self, user_id: i64) -> Result<Vec<Widget>, AppError>;
}

/// `GET <base_url>?user_id=<id>` with `Authorization: apiKey <key>`.
#[derive(Debug, Clone)]
pub struct HttpWidgetSource {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpWidgetSource {
    pub fn new(config: &WidgetsApiConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout.min(Duration::from_secs(5)))
            .build()
            .map_err(|e| AppError::config(format!("failed to build widget HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl WidgetSource for HttpWidgetSource {
    async fn fetch_widgets(&self, user_id: i64) -> Result<Vec<Widget>, AppError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("user_id", user_id)])
            .header(AUTHORIZATION, format!("apiKey {}", self.api_key))
            .send()
            .await
            .map_err(|e| {
                warn!(user_id, error = %e, "Widget service request failed");
                AppError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(user_id, status = status.as_u16(), "Widget service returned error status");
            return Err(AppError::upstream_unavailable(format!(
                "widget service responded {status}"
            )));
        }

        let widgets: Vec<Widget> = response.json().await.map_err(|e| {
            warn!(user_id, error = %e, "Widget service payload unreadable");
            AppError::from(e)
        })?;

        debug!(user_id, count = widgets.len(), "Fetched widgets");
        Ok(widgets)
    }
}

/// Fixed in-memory listing, keyed by user id. Users with no entry own nothing.
#[derive(Debug, Clone, Default)]
pub struct StaticWidgetSource {
    by_user: HashMap<i64, Vec<Widget>>,
}

impl StaticWidgetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_widgets(mut self, user_id: i64, widgets: Vec<Widget>) -> Self {
        self.by_user.insert(user_id, widgets);
        self
    }
}

#[async_trait]
impl WidgetSource for StaticWidgetSource {
    async fn fetch_widgets(&self, user_id: i64) -> Result<Vec<Widget>, AppError> {
        Ok(self.by_user.get(&user_id).cloned().unwrap_or_default())
    }
}
