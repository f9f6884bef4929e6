//! Token signing material for the gateway.
//!
//! Keys are derived once from the configured secret. The secret itself is not
//! retained and never appears in `Debug` output.

use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::config::gateway::GatewayConfig;

#[derive(Clone)]
pub struct SecurityConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl SecurityConfig {
    /// HS256 keys for the given shared secret.
    pub fn new(jwt_secret: impl AsRef<[u8]>) -> Self {
        let secret = jwt_secret.as_ref();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(config.jwt_secret.as_bytes())
    }

    /// Random per-process secret. Tokens signed with it do not survive a
    /// restart and are not accepted by any other instance.
    pub fn ephemeral() -> Self {
        let secret = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        Self::new(secret.as_bytes())
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn header(&self) -> Header {
        Header::new(self.algorithm)
    }

    /// Validation pinned to the configured algorithm; `exp` is required.
    pub fn validation(&self) -> Validation {
        Validation::new(self.algorithm)
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("algorithm", &self.algorithm)
            .field("jwt_secret", &"[REDACTED]")
            .finish()
    }
}
