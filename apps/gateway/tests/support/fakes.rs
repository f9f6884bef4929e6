//! In-process stand-ins for the gateway's collaborators.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gateway::domain::Widget;
use gateway::error::AppError;
use gateway::services::users::{InMemoryUserDirectory, UserRecord};
use gateway::services::widgets_client::WidgetSource;

pub fn ada() -> UserRecord {
    UserRecord {
        id: 1,
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
    }
}

pub fn grace() -> UserRecord {
    UserRecord {
        id: 2,
        name: "Grace Hopper".to_string(),
        email: "grace@example.com".to_string(),
    }
}

pub fn directory() -> InMemoryUserDirectory {
    InMemoryUserDirectory::new([ada(), grace()])
}

/// Ada's widgets, in the upstream's order.
pub fn sample_widgets() -> Vec<Widget> {
    vec![
        Widget::new(1, "floogle", "2018-11-20T10:00:00+0000"),
        Widget::new(2, "big-floogle", "2019-01-04T16:41:24+0200"),
        Widget::new(3, "x", "2019-03-01T00:00:00+0000"),
        Widget::new(4, "x", "2019-12-31T23:59:59+0000"),
        Widget::new(5, "x", "2020-01-01T00:00:00+0000"),
        Widget::new(6, "big-floogle", "2020-02-02T02:02:02-0500"),
    ]
}

/// Serves a fixed list and records every user id it was asked for.
#[derive(Clone, Default)]
pub struct RecordingWidgetSource {
    widgets: Vec<Widget>,
    calls: Arc<Mutex<Vec<i64>>>,
}

impl RecordingWidgetSource {
    pub fn new(widgets: Vec<Widget>) -> Self {
        Self {
            widgets,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<i64> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WidgetSource for RecordingWidgetSource {
    async fn fetch_widgets(&self, user_id: i64) -> Result<Vec<Widget>, AppError> {
        self.calls.lock().unwrap().push(user_id);
        Ok(self.widgets.clone())
    }
}

/// Fails every fetch the way a broken upstream would.
#[derive(Clone, Copy)]
pub enum FailingWidgetSource {
    Unavailable,
    TimedOut,
}

#[async_trait]
impl WidgetSource for FailingWidgetSource {
    async fn fetch_widgets(&self, _user_id: i64) -> Result<Vec<Widget>, AppError> {
        Err(match self {
            Self::Unavailable => AppError::upstream_unavailable("connection refused"),
            Self::TimedOut => AppError::upstream_timeout("deadline elapsed"),
        })
    }
}
