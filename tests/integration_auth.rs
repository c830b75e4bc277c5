mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{
    ELEVATION_SECRET, JWT_SECRET, PASSWORD, bearer_request, body_json, create_test_account,
    generate_unique_username, json_request, set_cookie, setup_test_app,
};
use lemon_auth::decode_token;
use lemon_db::AccountRepository;
use lemon_models::Role;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_register_success() {
    let app = setup_test_app();
    let username = generate_unique_username();

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/register",
            json!({ "username": username, "password": PASSWORD, "save_state": "{\"level\":1}" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = set_cookie(&response).unwrap();
    assert!(cookie.starts_with("lemon-token="));
    assert!(cookie.contains("HttpOnly"));

    let body = body_json(response).await;
    let claims = decode_token(body["token"].as_str().unwrap(), JWT_SECRET).unwrap();
    assert_eq!(claims.name, username);
    assert_eq!(claims.role, Role::User);
    assert!(!claims.guest);

    let stored = app
        .accounts
        .lookup_account_by_username(&username)
        .await
        .unwrap();
    assert_eq!(stored.id, claims.id);
    assert_eq!(stored.save_state, "{\"level\":1}");
    assert_ne!(stored.hash, PASSWORD);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = setup_test_app();
    let existing = create_test_account(&app, Role::User).await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/register",
            json!({ "username": existing.username, "password": "anotherpass" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(app.accounts.len(), 1);
}

#[tokio::test]
async fn test_register_short_password_is_rejected() {
    let app = setup_test_app();

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/register",
            json!({ "username": "shorty", "password": "abc" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(app.accounts.is_empty());
}

#[tokio::test]
async fn test_register_missing_field() {
    let app = setup_test_app();

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/register",
            json!({ "username": "nopass" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "password is required");
}

#[tokio::test]
async fn test_username_taken() {
    let app = setup_test_app();
    let existing = create_test_account(&app, Role::User).await;

    let taken = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/taken/{}", existing.username))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(taken.status(), StatusCode::CONFLICT);

    let free = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/taken/nobody-has-this-name")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(free.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_success() {
    let app = setup_test_app();
    let account = create_test_account(&app, Role::Developer).await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/login",
            json!({ "username": account.username, "password": PASSWORD }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).is_some());

    let body = body_json(response).await;
    let claims = decode_token(body["token"].as_str().unwrap(), JWT_SECRET).unwrap();
    assert_eq!(claims.id, account.id);
    assert_eq!(claims.sub, account.id);
    assert_eq!(claims.role, Role::Developer);
    assert_eq!(claims.exp - claims.nbf, 604_800);
}

#[tokio::test]
async fn test_login_accepts_legacy_hash_field() {
    let app = setup_test_app();
    let account = create_test_account(&app, Role::User).await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/login",
            json!({ "username": account.username, "hash": PASSWORD }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = setup_test_app();
    let account = create_test_account(&app, Role::User).await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/login",
            json!({ "username": account.username, "password": "wrongpass" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&response).is_none());
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid credentials");
}

#[tokio::test]
async fn test_login_unknown_account() {
    let app = setup_test_app();

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/login",
            json!({ "username": "ghost", "password": PASSWORD }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid account");
}

#[tokio::test]
async fn test_logout_clears_cookie_and_redirects() {
    let app = setup_test_app();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/login");
    let cookie = set_cookie(&response).unwrap();
    assert!(cookie.starts_with("lemon-token=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_elevate_with_correct_secret() {
    let app = setup_test_app();
    let account = create_test_account(&app, Role::User).await;
    let token = common::login_token(&app, &account.username).await;

    let response = app
        .router
        .clone()
        .oneshot(bearer_request(
            "PUT",
            "/api/elevate",
            &token,
            Some(json!({ "secret": ELEVATION_SECRET })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).is_some());
    let body = body_json(response).await;
    let claims = decode_token(body["token"].as_str().unwrap(), JWT_SECRET).unwrap();
    assert_eq!(claims.role, Role::Developer);

    let stored = app.accounts.lookup_account_by_id(&account.id).await.unwrap();
    assert_eq!(stored.role, Role::Developer);
}

#[tokio::test]
async fn test_elevate_with_wrong_secret() {
    let app = setup_test_app();
    let account = create_test_account(&app, Role::User).await;
    let token = common::login_token(&app, &account.username).await;

    let response = app
        .router
        .clone()
        .oneshot(bearer_request(
            "PUT",
            "/api/elevate",
            &token,
            Some(json!({ "secret": "not-it" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let stored = app.accounts.lookup_account_by_id(&account.id).await.unwrap();
    assert_eq!(stored.role, Role::User);
}

#[tokio::test]
async fn test_elevate_requires_session() {
    let app = setup_test_app();

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/elevate",
            json!({ "secret": ELEVATION_SECRET }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "missing token");
}

#[tokio::test]
async fn test_issued_token_is_bound_to_configured_secret() {
    let app = setup_test_app();
    let account = create_test_account(&app, Role::User).await;
    let token = common::login_token(&app, &account.username).await;

    assert!(decode_token(&token, &app.security.secret).is_ok());
    assert!(decode_token(&token, "some-other-secret").is_err());
}
