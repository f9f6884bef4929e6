pub mod auth_claims;
pub mod validated_json;

pub use auth_claims::{bearer_token, BearerClaims};
pub use validated_json::ValidatedJson;
