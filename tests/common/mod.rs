use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use fake::Fake;
use fake::faker::internet::en::Username;
use http_body_util::BodyExt;
use lemon::router::init_router;
use lemon::state::AppState;
use lemon_config::{CookieConfig, CorsConfig, SecurityConfig};
use lemon_core::hash_credential;
use lemon_db::AccountRepository;
use lemon_db::memory::{MemoryAccountRepository, MemoryFeedbackRepository};
use lemon_models::{Account, Role};
use serde_json::Value;
use uuid::Uuid;

pub const JWT_SECRET: &str = "integration_test_secret";
pub const SALT: &str = "integration_test_salt";
pub const ELEVATION_SECRET: &str = "let-me-in";
pub const PASSWORD: &str = "password123";

pub struct TestApp {
    pub router: Router,
    pub accounts: Arc<MemoryAccountRepository>,
    #[allow(dead_code)]
    pub feedback: Arc<MemoryFeedbackRepository>,
    pub security: SecurityConfig,
}

pub fn security(enforce: bool) -> SecurityConfig {
    SecurityConfig {
        secret: JWT_SECRET.to_string(),
        salt: SALT.to_string(),
        enforce,
        elevation_secret: Some(ELEVATION_SECRET.to_string()),
        token_expiry: 604_800,
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(security(true))
}

pub fn setup_test_app_with(security: SecurityConfig) -> TestApp {
    let accounts = Arc::new(MemoryAccountRepository::new());
    let feedback = Arc::new(MemoryFeedbackRepository::new());
    let cookie = CookieConfig {
        secure: false,
        ..CookieConfig::default()
    };
    let cors = CorsConfig {
        allowed_origins: vec!["http://localhost:3000".to_string()],
    };

    let state = AppState::new(
        accounts.clone(),
        feedback.clone(),
        security.clone(),
        cookie,
        cors,
    );

    TestApp {
        router: init_router(state),
        accounts,
        feedback,
        security,
    }
}

pub fn generate_unique_username() -> String {
    let base: String = Username().fake();
    format!("{}-{}", base, &Uuid::new_v4().simple().to_string()[..8])
}

/// Stores an account whose password is [`PASSWORD`].
#[allow(dead_code)]
pub async fn create_test_account(app: &TestApp, role: Role) -> Account {
    let username = generate_unique_username();
    let mut account = Account::new(&username, hash_credential(PASSWORD, SALT, &username));
    account.role = role;
    app.accounts.persist_account(&account).await.unwrap();
    account
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn bearer_request(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Value of the `Set-Cookie` header, if any.
#[allow(dead_code)]
pub fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Logs in and returns the issued token.
#[allow(dead_code)]
pub async fn login_token(app: &TestApp, username: &str) -> String {
    use tower::ServiceExt;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/login",
            serde_json::json!({ "username": username, "password": PASSWORD }),
        ))
        .await
        .unwrap();
    body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}
