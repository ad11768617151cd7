use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::info;

use gatehouse_core::error::AuthError;
use gatehouse_core::user::{Claims, LoginRequest, PublicUser, SignupRequest, User, UserStatus};

use super::cookie::{clearing_cookie, session_cookie};
use super::tokens::mint_session_token;
use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

/// Success envelope shared by the signup and login responses.
#[derive(Debug, Serialize)]
pub struct AuthSuccess {
    pub success: bool,
    pub message: &'static str,
    pub user: PublicUser,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<AuthSuccess>)> {
    request.validate()?;

    let username = request.username.trim().to_string();
    let email = request.email.trim().to_lowercase();

    // Friendly pre-check; the store's unique indexes remain the authority
    // under concurrent signups.
    if state.store.get_user_by_email(&email).await?.is_some()
        || state.store.get_user_by_username(&username).await?.is_some()
    {
        return Err(AuthError::DuplicateUser.into());
    }

    let password_hash = state
        .crypto
        .hash_password(&request.password)
        .map_err(|_| AppError::internal("Failed to hash password"))?;

    let full_name = request
        .full_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    let user = User::new(username, email, full_name);

    state.store.create_user(&user, &password_hash).await?;

    info!(username = %user.username, id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthSuccess {
            success: true,
            message: "User created successfully",
            user: PublicUser::from(&user),
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Response> {
    let email = request.email.trim().to_lowercase();

    let user = state
        .store
        .get_user_by_email(&email)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    let password_hash = state
        .store
        .get_password_hash(user.id)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let verified = state
        .crypto
        .verify_password(&request.password, &password_hash)
        .map_err(|_| AppError::internal("Failed to verify password"))?;

    if !verified {
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = mint_session_token(&state.config.token_secret, &user)
        .map_err(|_| AppError::internal("Failed to mint session token"))?;

    state.store.set_status(user.id, UserStatus::Online).await?;

    info!(username = %user.username, "login successful");

    let cookie = session_cookie(&token, state.config.cookie_secure());
    let cookie = HeaderValue::from_str(&cookie)
        .map_err(|_| AppError::internal("Failed to encode session cookie"))?;

    let mut response = Json(AuthSuccess {
        success: true,
        message: "Login successful",
        user: PublicUser::from(&user),
    })
    .into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie);

    Ok(response)
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Response> {
    state
        .store
        .set_status(claims.sub, UserStatus::Offline)
        .await?;

    let cookie = clearing_cookie(state.config.cookie_secure());
    let cookie = HeaderValue::from_str(&cookie)
        .map_err(|_| AppError::internal("Failed to encode session cookie"))?;

    let mut response = Json(serde_json::json!({
        "success": true,
        "message": "Logout successful",
    }))
    .into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie);

    Ok(response)
}
