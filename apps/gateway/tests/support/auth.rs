//! Token helpers for tests

use std::time::{Duration, SystemTime};

use gateway::auth::jwt::mint_access_token;
use gateway::services::users::UserRecord;
use gateway::state::security_config::SecurityConfig;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET.as_bytes())
}

/// Mint a token for `user` with the given scopes (without "Bearer " prefix).
pub fn mint_test_token(user: &UserRecord, scopes: &[&str], sec: &SecurityConfig) -> String {
    let scopes: Vec<String> = scopes.iter().map(|s| s.to_string()).collect();
    mint_access_token(user, &user.email, &scopes, SystemTime::now(), sec)
        .expect("should mint token successfully")
}

/// Full Authorization header value including the "Bearer " prefix.
pub fn bearer_header(user: &UserRecord, scopes: &[&str], sec: &SecurityConfig) -> String {
    format!("Bearer {}", mint_test_token(user, scopes, sec))
}

/// Token whose 24h lifetime ended an hour ago.
pub fn mint_expired_token(user: &UserRecord, scopes: &[&str], sec: &SecurityConfig) -> String {
    let scopes: Vec<String> = scopes.iter().map(|s| s.to_string()).collect();
    let issued = SystemTime::now() - Duration::from_secs(25 * 60 * 60);
    mint_access_token(user, &user.email, &scopes, issued, sec)
        .expect("should mint expired token successfully")
}
