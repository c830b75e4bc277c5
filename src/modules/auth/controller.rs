use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;
use lemon_auth::cookie::{removal_cookie, session_cookie};
use lemon_core::AppError;
use lemon_models::{ElevateRequest, LoginRequest, RegisterRequest, TokenResponse};
use tracing::instrument;

use super::service::AuthService;
use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthSession;
use crate::state::AppState;
use crate::validator::ValidatedJson;

fn with_session(state: &AppState, jar: CookieJar, token: String) -> (CookieJar, Json<TokenResponse>) {
    let cookie = session_cookie(&state.cookie, token.clone(), state.security.token_expiry);
    (jar.add(cookie), Json(TokenResponse { token }))
}

/// Create an account and start a session
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created, session cookie set", body = TokenResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<TokenResponse>), AppError> {
    let (_, token) = AuthService::register(state.accounts.as_ref(), &state.security, dto).await?;
    let (jar, body) = with_session(&state, jar, token);
    Ok((StatusCode::CREATED, jar, body))
}

/// Check whether a username is already registered
#[utoipa::path(
    get,
    path = "/api/taken/{username}",
    params(("username" = String, Path, description = "Username to check")),
    responses(
        (status = 200, description = "Username is available"),
        (status = 409, description = "Username is taken")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn username_taken(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<StatusCode, AppError> {
    if AuthService::is_username_taken(state.accounts.as_ref(), &username).await? {
        Ok(StatusCode::CONFLICT)
    } else {
        Ok(StatusCode::OK)
    }
}

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = TokenResponse),
        (status = 401, description = "Unknown account or wrong password", body = ErrorResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<TokenResponse>), AppError> {
    let (_, token) = AuthService::login(state.accounts.as_ref(), &state.security, dto).await?;
    Ok(with_session(&state, jar, token))
}

/// Clear the session cookie and redirect to the login page
///
/// Tokens stay valid until they expire; only the cookie is dropped.
#[utoipa::path(
    get,
    path = "/api/logout",
    responses((status = 308, description = "Cookie cleared, redirect to /login")),
    tag = "Authentication"
)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.add(removal_cookie(&state.cookie)), Redirect::permanent("/login"))
}

/// Promote the caller to DEVELOPER with the shared elevation secret
#[utoipa::path(
    put,
    path = "/api/elevate",
    request_body = ElevateRequest,
    responses(
        (status = 200, description = "Promoted; new token reflects the role", body = TokenResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Wrong or unconfigured secret", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn elevate(
    State(state): State<AppState>,
    session: AuthSession,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<ElevateRequest>,
) -> Result<(CookieJar, Json<TokenResponse>), AppError> {
    let account_id = session.account_id()?;
    let elevation =
        AuthService::elevate(state.accounts.as_ref(), &state.security, account_id, &dto.secret)
            .await?;
    Ok(with_session(&state, jar, elevation.token))
}
