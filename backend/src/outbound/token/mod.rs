//! Session token adapters.

mod jwt_session_tokens;

pub use jwt_session_tokens::{DEFAULT_TOKEN_TTL_HOURS, JwtSessionTokens};
