//! User lookup: maps a login email to an identity record.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;

use crate::error::AppError;
use crate::logging::pii::Redacted;

/// Identity record held by the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Outcome of a directory lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    Found(UserRecord),
    NotFound,
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<UserLookup, AppError>;
}

/// Normalize an email for comparison: trim, NFKC, lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().nfkc().collect::<String>().to_lowercase()
}

/// Directory held entirely in memory, keyed by normalized email.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    by_email: HashMap<String, UserRecord>,
}

impl InMemoryUserDirectory {
    /// Later records win when two normalize to the same email.
    pub fn new(records: impl IntoIterator<Item = UserRecord>) -> Self {
        let by_email = records
            .into_iter()
            .map(|record| (normalize_email(&record.email), record))
            .collect();
        Self { by_email }
    }

    /// Load a JSON array of `{id, name, email}` objects.
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("failed to read users file {}: {e}", path.display()))
        })?;
        let records: Vec<UserRecord> = serde_json::from_str(&raw).map_err(|e| {
            AppError::config(format!("invalid users file {}: {e}", path.display()))
        })?;

        let directory = Self::new(records);
        info!(path = %path.display(), users = directory.len(), "Loaded user directory");
        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.by_email.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_email.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<UserLookup, AppError> {
        let key = normalize_email(email);
        if key.is_empty() {
            return Ok(UserLookup::NotFound);
        }

        match self.by_email.get(&key) {
            Some(record) => Ok(UserLookup::Found(record.clone())),
            None => {
                debug!(email = %Redacted(email), "No directory entry for email");
                Ok(UserLookup::NotFound)
            }
        }
    }
}
