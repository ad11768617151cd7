use axum::{Extension, Json, extract::State};
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use gatehouse_core::error::AuthError;
use gatehouse_core::user::{Claims, ProfileUpdateRequest, User};

use crate::infra::{app_state::AppState, errors::AppResult};

/// Envelope for profile responses. The record itself carries no password
/// hash, so serializing it whole is safe.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub user: User,
}

/// `GET /users/me` — the authenticated user's full profile.
///
/// The claims alone prove identity; the store is consulted only to load the
/// current record, which may have vanished since the token was minted.
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<ProfileResponse>> {
    let user = state
        .store
        .get_user_by_id(claims.sub)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(Json(ProfileResponse {
        success: true,
        user,
    }))
}

/// `PUT /users/me` — profile edits: full name, bio, status.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<ProfileUpdateRequest>,
) -> AppResult<Json<ProfileResponse>> {
    request.validate()?;

    let mut user = state
        .store
        .get_user_by_id(claims.sub)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    if let Some(full_name) = request.full_name {
        let trimmed = full_name.trim();
        user.full_name = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    if let Some(bio) = request.bio {
        user.bio = bio;
    }

    if let Some(status) = request.status {
        user.status = status;
    }

    user.updated_at = Utc::now();

    state.store.update_user(&user).await?;

    info!(username = %user.username, "profile updated");

    Ok(Json(ProfileResponse {
        success: true,
        user,
    }))
}
