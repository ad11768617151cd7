use chrono::{Duration, Utc};
use gatehouse_core::error::AuthError;
use gatehouse_core::user::{Claims, User};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};

/// Fixed session validity window. Cookie `Max-Age` matches this value.
pub const SESSION_TTL_SECS: i64 = 3600; // 1 hour

/// Mint an HS256 session token embedding the user's identity claims.
///
/// The token is the sole authorization proof: nothing is persisted
/// server-side, so possession of a valid, unexpired token is sufficient.
pub fn mint_session_token(
    secret: &str,
    user: &User,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let exp = now + Duration::seconds(SESSION_TTL_SECS);

    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
}

/// Decode and verify a session token.
///
/// Signature or structural failures map to [`AuthError::InvalidToken`];
/// a valid-but-stale token maps to [`AuthError::Expired`]. A pure
/// signature + expiry check; the credential store is never consulted.
pub fn decode_session_token(secret: &str, token: &str) -> Result<Claims, AuthError> {
    let validation = Validation::new(Algorithm::HS256);

    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    ) {
        Ok(data) => Ok(data.claims),
        Err(err) => Err(match err.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::InvalidToken,
        }),
    }
}
