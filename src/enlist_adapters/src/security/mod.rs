pub mod jwt_session_issuer;
pub mod os_rng_token_issuer;

pub use jwt_session_issuer::{JwtSessionConfig, JwtSessionIssuer, SessionClaims};
pub use os_rng_token_issuer::OsRngTokenIssuer;
