use axum::{extract::FromRequestParts, http::request::Parts};
use lemon_auth::{AuthError, Session, authenticate};
use lemon_core::AppError;
use lemon_models::Role;

use crate::metrics::track_auth_rejection;
use crate::state::AppState;

/// Extractor that authenticates the request from its session cookie or
/// bearer header.
///
/// With enforcement off this never rejects; handlers that need an account
/// then fail through [`AuthSession::account_id`] when no token was sent.
#[derive(Debug, Clone)]
pub struct AuthSession(pub Session);

impl AuthSession {
    /// The caller's account id, or 401 when the session carries no claims.
    pub fn account_id(&self) -> Result<&str, AppError> {
        self.0
            .account_id()
            .ok_or_else(|| AppError::unauthorized("No account in session"))
    }
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(&parts.headers, &state.security, &state.cookie)
            .map(AuthSession)
            .map_err(reject)
    }
}

/// Extractor that additionally requires the token's role to include
/// `DEVELOPER`.
#[derive(Debug, Clone)]
pub struct RequireDeveloper(pub Session);

impl FromRequestParts<AppState> for RequireDeveloper {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthSession(session) = AuthSession::from_request_parts(parts, state).await?;
        session.require_role(Role::Developer).map_err(reject)?;
        Ok(RequireDeveloper(session))
    }
}

fn reject(err: AuthError) -> AppError {
    track_auth_rejection(err.reason());
    err.into()
}
