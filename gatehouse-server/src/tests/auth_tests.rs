//! HTTP-level tests for the signup/login/logout flow, walking the concrete
//! scenario the service contract describes.

use axum::{
    body::Body,
    http::{HeaderValue, Request, StatusCode, header},
};
use axum_test::{TestResponse, TestServer};
use serde_json::{Value, json};
use tower::ServiceExt;

use gatehouse_core::user::UserStatus;

use crate::routes::create_router;
use crate::tests::fixtures::{TEST_TOKEN_SECRET, test_state};
use crate::users::auth::decode_session_token;

fn test_server() -> TestServer {
    TestServer::new(create_router(test_state())).expect("failed to start test server")
}

/// Pull the raw session cookie and the token it carries out of a login
/// response.
fn session_cookie(res: &TestResponse) -> (String, String) {
    let cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .expect("expected a Set-Cookie header")
        .to_str()
        .expect("cookie is valid UTF-8")
        .to_string();

    let token = cookie
        .strip_prefix("token=")
        .expect("cookie starts with token=")
        .split(';')
        .next()
        .unwrap()
        .to_string();

    (cookie, token)
}

#[tokio::test]
async fn health_endpoint_answers() {
    let app = create_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

async fn signup_alice(server: &TestServer) -> TestResponse {
    server
        .post("/users/signup")
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "secret1",
        }))
        .await
}

#[tokio::test]
async fn signup_returns_public_projection() {
    let server = test_server();

    let res = signup_alice(&server).await;
    res.assert_status(StatusCode::CREATED);

    let body: Value = res.json();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["user"]["username"], json!("alice"));
    assert_eq!(body["user"]["email"], json!("alice@example.com"));

    // Only the non-sensitive fields are echoed back.
    let mut keys: Vec<&str> = body["user"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["email", "id", "username"]);
}

#[tokio::test]
async fn signup_rejects_duplicate_identity() {
    let server = test_server();
    signup_alice(&server).await.assert_status(StatusCode::CREATED);

    // Same email, different username
    let res = server
        .post("/users/signup")
        .json(&json!({
            "username": "alice2",
            "email": "alice@example.com",
            "password": "secret1",
        }))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["error"], json!("User already exists"));

    // Same username, different email
    let res = server
        .post("/users/signup")
        .json(&json!({
            "username": "alice",
            "email": "alice2@example.com",
            "password": "secret1",
        }))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn signup_validates_the_candidate() {
    let server = test_server();

    let res = server
        .post("/users/signup")
        .json(&json!({
            "username": "al",
            "email": "al@example.com",
            "password": "secret1",
        }))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);

    let res = server
        .post("/users/signup")
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "short",
        }))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_distinguishes_unknown_user_from_wrong_password() {
    let server = test_server();
    signup_alice(&server).await.assert_status(StatusCode::CREATED);

    let res = server
        .post("/users/login")
        .json(&json!({
            "email": "nobody@example.com",
            "password": "secret1",
        }))
        .await;
    res.assert_status(StatusCode::NOT_FOUND);
    let body: Value = res.json();
    assert_eq!(body["error"], json!("User not found"));
    assert!(res.headers().get(header::SET_COOKIE).is_none());

    let res = server
        .post("/users/login")
        .json(&json!({
            "email": "alice@example.com",
            "password": "wrong",
        }))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["error"], json!("Invalid password"));
    assert!(res.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn login_issues_a_decodable_session_cookie() {
    let server = test_server();
    signup_alice(&server).await.assert_status(StatusCode::CREATED);

    let res = server
        .post("/users/login")
        .json(&json!({
            "email": "alice@example.com",
            "password": "secret1",
        }))
        .await;
    res.assert_status(StatusCode::OK);

    let body: Value = res.json();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["user"]["email"], json!("alice@example.com"));

    let (cookie, token) = session_cookie(&res);
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=3600"));
    // dev mode: no Secure attribute
    assert!(!cookie.contains("Secure"));

    let claims = decode_session_token(TEST_TOKEN_SECRET, &token).expect("token decodes");
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.email, "alice@example.com");
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[tokio::test]
async fn login_normalizes_the_email() {
    let server = test_server();
    signup_alice(&server).await.assert_status(StatusCode::CREATED);

    let res = server
        .post("/users/login")
        .json(&json!({
            "email": "  Alice@Example.COM ",
            "password": "secret1",
        }))
        .await;
    res.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn logout_clears_the_cookie_and_flips_status() {
    let server = test_server();
    signup_alice(&server).await.assert_status(StatusCode::CREATED);

    let res = server
        .post("/users/login")
        .json(&json!({
            "email": "alice@example.com",
            "password": "secret1",
        }))
        .await;
    let (_, token) = session_cookie(&res);

    let res = server
        .post("/users/logout")
        .add_header(
            header::COOKIE,
            HeaderValue::from_str(&format!("token={token}")).unwrap(),
        )
        .await;
    res.assert_status(StatusCode::OK);

    let (cleared, _) = session_cookie(&res);
    assert!(cleared.contains("Max-Age=0"));

    // Status flipped back to offline; the record is still readable with the
    // (still unexpired) token.
    let res = server
        .get("/users/me")
        .add_header(
            header::COOKIE,
            HeaderValue::from_str(&format!("token={token}")).unwrap(),
        )
        .await;
    res.assert_status(StatusCode::OK);
    let body: Value = res.json();
    assert_eq!(body["user"]["status"], json!(UserStatus::Offline.as_str()));
}
