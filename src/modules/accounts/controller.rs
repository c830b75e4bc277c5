use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use lemon_auth::cookie::removal_cookie;
use lemon_core::AppError;
use lemon_models::{Account, UpdateSaveRequest};
use tracing::instrument;

use super::service::AccountService;
use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthSession;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Fetch the caller's account and save state
#[utoipa::path(
    get,
    path = "/api/save",
    responses(
        (status = 200, description = "The caller's account", body = Account),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Accounts"
)]
#[instrument(skip_all)]
pub async fn get_save(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<Account>, AppError> {
    let account = AccountService::get_account(state.accounts.as_ref(), session.account_id()?).await?;
    Ok(Json(account))
}

/// Replace the caller's save state, optionally changing the password
#[utoipa::path(
    put,
    path = "/api/save",
    request_body = UpdateSaveRequest,
    responses(
        (status = 200, description = "Save state stored", body = Account),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Accounts"
)]
#[instrument(skip_all)]
pub async fn update_save(
    State(state): State<AppState>,
    session: AuthSession,
    ValidatedJson(dto): ValidatedJson<UpdateSaveRequest>,
) -> Result<Json<Account>, AppError> {
    let account = AccountService::update_save(
        state.accounts.as_ref(),
        &state.security,
        session.account_id()?,
        dto,
    )
    .await?;
    Ok(Json(account))
}

/// Delete the caller's account and clear the session cookie
#[utoipa::path(
    delete,
    path = "/api/save",
    responses(
        (status = 200, description = "Account deleted"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Accounts"
)]
#[instrument(skip_all)]
pub async fn delete_save(
    State(state): State<AppState>,
    session: AuthSession,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar), AppError> {
    AccountService::delete_account(state.accounts.as_ref(), session.account_id()?).await?;
    Ok((StatusCode::OK, jar.add(removal_cookie(&state.cookie))))
}
