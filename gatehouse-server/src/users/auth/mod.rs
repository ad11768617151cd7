//! Authentication: signup/login handlers, session tokens, the session
//! cookie, and the validation middleware.

pub mod cookie;
pub mod handlers;
pub mod middleware;
pub mod tokens;

pub use tokens::{SESSION_TTL_SECS, decode_session_token, mint_session_token};
