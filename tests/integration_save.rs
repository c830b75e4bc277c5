mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use common::{
    PASSWORD, bearer_request, body_json, create_test_account, json_request, login_token,
    security, set_cookie, setup_test_app, setup_test_app_with,
};
use lemon_auth::issue_token_at;
use lemon_db::AccountRepository;
use lemon_models::Role;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_get_save_with_bearer_token() {
    let app = setup_test_app();
    let account = create_test_account(&app, Role::User).await;
    let token = login_token(&app, &account.username).await;

    let response = app
        .router
        .clone()
        .oneshot(bearer_request("GET", "/api/save", &token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], account.id);
    assert_eq!(body["username"], account.username);
    assert_eq!(body["role"], "USER");
    assert!(body.get("hash").is_none());
}

#[tokio::test]
async fn test_get_save_with_cookie() {
    let app = setup_test_app();
    let account = create_test_account(&app, Role::User).await;
    let token = login_token(&app, &account.username).await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/save")
                .header(header::COOKIE, format!("lemon-token={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], account.id);
}

#[tokio::test]
async fn test_cookie_wins_over_invalid_bearer() {
    let app = setup_test_app();
    let account = create_test_account(&app, Role::User).await;
    let token = login_token(&app, &account.username).await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/save")
                .header(header::COOKIE, format!("lemon-token={token}"))
                .header(header::AUTHORIZATION, "Bearer not.a.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_save_without_token() {
    let app = setup_test_app();

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/api/save").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_save_with_basic_auth_is_malformed() {
    let app = setup_test_app();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/save")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["error"],
        "malformed authorization header"
    );
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = setup_test_app();
    let account = create_test_account(&app, Role::User).await;
    let issued_at = Utc::now().timestamp() - app.security.token_expiry - 10;
    let token = issue_token_at(&account, &app.security, issued_at).unwrap();

    let response = app
        .router
        .clone()
        .oneshot(bearer_request("GET", "/api/save", &token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "token has expired");
}

#[tokio::test]
async fn test_future_token_is_rejected() {
    let app = setup_test_app();
    let account = create_test_account(&app, Role::User).await;
    let token = issue_token_at(&account, &app.security, Utc::now().timestamp() + 3_600).unwrap();

    let response = app
        .router
        .clone()
        .oneshot(bearer_request("GET", "/api/save", &token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "token not yet valid");
}

#[tokio::test]
async fn test_update_save_state() {
    let app = setup_test_app();
    let account = create_test_account(&app, Role::User).await;
    let token = login_token(&app, &account.username).await;

    let response = app
        .router
        .clone()
        .oneshot(bearer_request(
            "PUT",
            "/api/save",
            &token,
            Some(json!({ "save_state": "{\"coins\":42}" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["save_state"], "{\"coins\":42}");

    let stored = app.accounts.lookup_account_by_id(&account.id).await.unwrap();
    assert_eq!(stored.save_state, "{\"coins\":42}");
    assert_eq!(stored.hash, account.hash);
}

#[tokio::test]
async fn test_update_save_changes_password() {
    let app = setup_test_app();
    let account = create_test_account(&app, Role::User).await;
    let token = login_token(&app, &account.username).await;

    let response = app
        .router
        .clone()
        .oneshot(bearer_request(
            "PUT",
            "/api/save",
            &token,
            Some(json!({ "save_state": "", "password": "brand-new-password" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let old = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/login",
            json!({ "username": account.username, "password": PASSWORD }),
        ))
        .await
        .unwrap();
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);

    let new = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/login",
            json!({ "username": account.username, "password": "brand-new-password" }),
        ))
        .await
        .unwrap();
    assert_eq!(new.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_save_removes_account() {
    let app = setup_test_app();
    let account = create_test_account(&app, Role::User).await;
    let token = login_token(&app, &account.username).await;

    let response = app
        .router
        .clone()
        .oneshot(bearer_request("DELETE", "/api/save", &token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).unwrap().contains("Max-Age=0"));
    assert!(app.accounts.is_empty());

    // The token outlives the account; the lookup is what fails.
    let after = app
        .router
        .clone()
        .oneshot(bearer_request("GET", "/api/save", &token, None))
        .await
        .unwrap();
    assert_eq!(after.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unenforced_mode_accepts_expired_token() {
    let app = setup_test_app_with(security(false));
    let account = create_test_account(&app, Role::User).await;
    let token = issue_token_at(&account, &app.security, 1_000).unwrap();

    let response = app
        .router
        .clone()
        .oneshot(bearer_request("GET", "/api/save", &token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], account.id);
}

#[tokio::test]
async fn test_unenforced_mode_without_token_has_no_account() {
    let app = setup_test_app_with(security(false));

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/api/save").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "No account in session");
}
