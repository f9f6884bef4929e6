pub mod claims;
pub mod jwt;

pub use claims::{Claims, WIDGETS_SCOPE};
pub use jwt::{mint_access_token, verify_access_token, TOKEN_TTL_SECS};
