use axum::{
    Json, Router, middleware,
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::AppState;
use crate::users::{auth, user_handlers};

/// Create the application router.
///
/// Signup and login are public; everything under the protected block runs
/// behind the session-validation middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Public authentication endpoints
        .route("/users/signup", post(auth::handlers::signup))
        .route("/users/login", post(auth::handlers::login))
        // Merge protected routes
        .merge(create_protected_routes(state.clone()))
        .route("/health", get(health))
        .with_state(state)
}

/// Create protected routes that require a valid session token
fn create_protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/users/me",
            get(user_handlers::me).put(user_handlers::update_profile),
        )
        .route("/users/logout", post(auth::handlers::logout))
        .route_layer(middleware::from_fn_with_state(
            state,
            auth::middleware::auth_middleware,
        ))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
