use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use super::cookie::session_token_from_cookies;
use super::tokens::decode_session_token;
use crate::infra::{app_state::AppState, errors::AppError};

/// Session validation for protected routes.
///
/// Accepts the session cookie or a `Bearer` header, verifies signature and
/// expiry, and inserts the decoded claims as a request extension. No store
/// round-trip: the claims are the request-scoped identity.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_session_token(&request)
        .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

    let claims = decode_session_token(&state.config.token_secret, &token)?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

fn extract_session_token(request: &Request) -> Option<String> {
    if let Some(token) = session_token_from_cookies(request.headers()) {
        return Some(token);
    }

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())?;

    auth_header
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
}
