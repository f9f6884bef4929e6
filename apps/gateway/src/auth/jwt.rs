use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode};

use super::claims::Claims;
use crate::error::AppError;
use crate::services::users::UserRecord;
use crate::state::security_config::SecurityConfig;

/// Access tokens live for 24 hours.
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Mint a HS256 JWT access token for `user`, valid for [`TOKEN_TTL_SECS`] from `now`.
///
/// `email` and `scopes` are taken as supplied by the caller, not from the
/// directory record.
pub fn mint_access_token(
    user: &UserRecord,
    email: &str,
    scopes: &[String],
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_secs() as i64;

    let claims = Claims {
        sub: user.id,
        name: user.name.clone(),
        email: email.to_string(),
        scope: scopes.to_vec(),
        exp: iat + TOKEN_TTL_SECS,
    };

    encode_claims(&claims, security)
}

/// Sign an already-built claims object.
pub fn encode_claims(claims: &Claims, security: &SecurityConfig) -> Result<String, AppError> {
    encode(&security.header(), claims, security.encoding_key())
        .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a JWT and return its claims.
///
/// Every failure is an `InvalidToken`; the `reason` distinguishes
/// `token_expired`, `invalid_signature`, `wrong_algorithm` and
/// `malformed_token` for logging.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    decode::<Claims>(token, security.decoding_key(), &security.validation())
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::invalid_token("token_expired"),
            ErrorKind::InvalidSignature => AppError::invalid_token("invalid_signature"),
            ErrorKind::InvalidAlgorithm => AppError::invalid_token("wrong_algorithm"),
            _ => AppError::invalid_token("malformed_token"),
        })
}
