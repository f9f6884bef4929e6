//! Gateway configuration loaded from environment variables.
//!
//! Secrets (token signing key, downstream API key) are only ever read here and
//! handed to `AppState`; nothing else in the crate touches the environment.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;
use crate::state::app_state::DEFAULT_MAX_JSON_PAYLOAD_SIZE;

pub const DEFAULT_WIDGETS_API_URL: &str =
    "https://us-central1-interview-d93bf.cloudfunctions.net/widgets";
pub const DEFAULT_WIDGETS_TIMEOUT_MS: u64 = 10_000;
pub const MIN_JWT_SECRET_LEN: usize = 32;

const REDACTED: &str = "[REDACTED]";

/// Downstream widget service settings.
#[derive(Clone)]
pub struct WidgetsApiConfig {
    pub url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl fmt::Debug for WidgetsApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetsApiConfig")
            .field("url", &self.url)
            .field("api_key", &REDACTED)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Shape of the process log output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event
    #[default]
    Json,
    /// Single-line human-readable events, for local runs
    Text,
}

impl LogFormat {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "text" => Some(Self::Text),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct GatewayConfig {
    // Server configuration
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,

    // Security configuration
    pub jwt_secret: String,

    // Downstream listing service
    pub widgets_api: WidgetsApiConfig,

    // User directory seed (optional)
    pub users_file: Option<PathBuf>,

    // HTTP payload limits
    pub max_json_payload_size: usize,
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_format", &self.log_format)
            .field("jwt_secret", &REDACTED)
            .field("widgets_api", &self.widgets_api)
            .field("users_file", &self.users_file)
            .field("max_json_payload_size", &self.max_json_payload_size)
            .finish()
    }
}

impl GatewayConfig {
    /// Load and validate all configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("GATEWAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = env::var("GATEWAY_PORT").unwrap_or_else(|_| "5000".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!(
                "GATEWAY_PORT must be a valid port number, got '{port_str}'"
            ))
        })?;

        let log_format = match env::var("GATEWAY_LOG_FORMAT") {
            Ok(raw) => LogFormat::parse(&raw).ok_or_else(|| {
                AppError::config(format!(
                    "GATEWAY_LOG_FORMAT must be 'json' or 'text', got '{raw}'"
                ))
            })?,
            Err(_) => LogFormat::default(),
        };

        let jwt_secret = required("GATEWAY_JWT_SECRET")?;
        if jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(AppError::config(format!(
                "GATEWAY_JWT_SECRET is too short. It should be at least {MIN_JWT_SECRET_LEN} characters."
            )));
        }

        let api_key = required("WIDGETS_API_KEY")?;
        let url = env::var("WIDGETS_API_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_WIDGETS_API_URL.to_string());

        let timeout_ms = match env::var("WIDGETS_TIMEOUT_MS") {
            Ok(raw) => raw.parse::<u64>().ok().filter(|ms| *ms > 0).ok_or_else(|| {
                AppError::config(format!(
                    "WIDGETS_TIMEOUT_MS must be a positive integer, got '{raw}'"
                ))
            })?,
            Err(_) => DEFAULT_WIDGETS_TIMEOUT_MS,
        };

        let users_file = env::var("GATEWAY_USERS_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let max_json_payload_size = env::var("MAX_JSON_PAYLOAD_SIZE")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_JSON_PAYLOAD_SIZE);

        Ok(GatewayConfig {
            host,
            port,
            log_format,
            jwt_secret,
            widgets_api: WidgetsApiConfig {
                url,
                api_key,
                timeout: Duration::from_millis(timeout_ms),
            },
            users_file,
            max_json_payload_size,
        })
    }
}

fn required(name: &str) -> Result<String, AppError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::config(format!("{name} must be set"))),
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const VARS: [&str; 9] = [
        "GATEWAY_HOST",
        "GATEWAY_PORT",
        "GATEWAY_LOG_FORMAT",
        "GATEWAY_JWT_SECRET",
        "WIDGETS_API_KEY",
        "WIDGETS_API_URL",
        "WIDGETS_TIMEOUT_MS",
        "GATEWAY_USERS_FILE",
        "MAX_JSON_PAYLOAD_SIZE",
    ];

    fn reset_env() {
        for name in VARS {
            env::remove_var(name);
        }
        env::set_var(
            "GATEWAY_JWT_SECRET",
            "a_signing_secret_that_is_long_enough_123",
        );
        env::set_var("WIDGETS_API_KEY", "key-123");
    }

    fn config_detail(result: Result<GatewayConfig, AppError>) -> String {
        match result {
            Err(AppError::Config { detail }) => detail,
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        reset_env();

        let cfg = GatewayConfig::from_env().expect("load config");
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.log_format, LogFormat::Json);
        assert_eq!(cfg.widgets_api.url, DEFAULT_WIDGETS_API_URL);
        assert_eq!(cfg.widgets_api.api_key, "key-123");
        assert_eq!(
            cfg.widgets_api.timeout,
            Duration::from_millis(DEFAULT_WIDGETS_TIMEOUT_MS)
        );
        assert!(cfg.users_file.is_none());
        assert_eq!(cfg.max_json_payload_size, DEFAULT_MAX_JSON_PAYLOAD_SIZE);
    }

    #[test]
    #[serial]
    fn test_overrides() {
        reset_env();
        env::set_var("GATEWAY_PORT", "8080");
        env::set_var("WIDGETS_API_URL", "http://127.0.0.1:9999/widgets");
        env::set_var("WIDGETS_TIMEOUT_MS", "250");
        env::set_var("GATEWAY_USERS_FILE", "/etc/gateway/users.json");
        env::set_var("GATEWAY_LOG_FORMAT", "Text");

        let cfg = GatewayConfig::from_env().expect("load config");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.log_format, LogFormat::Text);
        assert_eq!(cfg.widgets_api.url, "http://127.0.0.1:9999/widgets");
        assert_eq!(cfg.widgets_api.timeout, Duration::from_millis(250));
        assert_eq!(
            cfg.users_file,
            Some(PathBuf::from("/etc/gateway/users.json"))
        );
    }

    #[test]
    #[serial]
    fn test_missing_secrets() {
        reset_env();
        env::remove_var("WIDGETS_API_KEY");
        assert_eq!(
            config_detail(GatewayConfig::from_env()),
            "WIDGETS_API_KEY must be set"
        );

        reset_env();
        env::remove_var("GATEWAY_JWT_SECRET");
        assert_eq!(
            config_detail(GatewayConfig::from_env()),
            "GATEWAY_JWT_SECRET must be set"
        );
    }

    #[test]
    #[serial]
    fn test_short_secret_rejected() {
        reset_env();
        env::set_var("GATEWAY_JWT_SECRET", "short");
        assert!(config_detail(GatewayConfig::from_env()).contains("too short"));
    }

    #[test]
    #[serial]
    fn test_bad_numbers_rejected() {
        reset_env();
        env::set_var("GATEWAY_PORT", "http");
        assert!(config_detail(GatewayConfig::from_env()).contains("GATEWAY_PORT"));

        reset_env();
        env::set_var("WIDGETS_TIMEOUT_MS", "0");
        assert!(config_detail(GatewayConfig::from_env()).contains("WIDGETS_TIMEOUT_MS"));

        reset_env();
        env::set_var("GATEWAY_LOG_FORMAT", "xml");
        assert!(config_detail(GatewayConfig::from_env()).contains("GATEWAY_LOG_FORMAT"));
    }

    #[test]
    #[serial]
    fn test_debug_hides_secrets() {
        reset_env();

        let rendered = format!("{:?}", GatewayConfig::from_env().expect("load config"));
        assert!(!rendered.contains("a_signing_secret_that_is_long_enough_123"));
        assert!(!rendered.contains("key-123"));
        assert!(rendered.contains(DEFAULT_WIDGETS_API_URL));
    }
}
