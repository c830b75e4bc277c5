//! Recovering a caller's identity from request headers.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use tracing::warn;

use lemon_config::{CookieConfig, SecurityConfig};
use lemon_models::Role;

use crate::claims::Claims;
use crate::error::AuthError;
use crate::jwt::decode_token;

const BEARER_PREFIX: &str = "Bearer ";

/// Outcome of a successful [`authenticate`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    /// Token present, verified and inside its validity window.
    Verified(Claims),
    /// Enforcement is off. Carries the claims of a decodable token if the
    /// request happened to have one.
    Unenforced(Option<Claims>),
}

impl Session {
    pub fn claims(&self) -> Option<&Claims> {
        match self {
            Session::Verified(claims) => Some(claims),
            Session::Unenforced(claims) => claims.as_ref(),
        }
    }

    pub fn account_id(&self) -> Option<&str> {
        self.claims().map(|c| c.id.as_str())
    }

    pub fn name(&self) -> Option<&str> {
        self.claims().map(|c| c.name.as_str())
    }

    pub fn role(&self) -> Option<Role> {
        self.claims().map(|c| c.role)
    }

    pub fn is_enforced(&self) -> bool {
        matches!(self, Session::Verified(_))
    }

    /// Fails with [`AuthError::Forbidden`] unless the token's role covers
    /// `required`. Unenforced sessions always pass.
    pub fn require_role(&self, required: Role) -> Result<(), AuthError> {
        match self {
            Session::Verified(claims) if claims.role.includes(required) => Ok(()),
            Session::Verified(claims) => {
                warn!(
                    account_id = %claims.id,
                    role = %claims.role,
                    required = %required,
                    "Role check failed"
                );
                Err(AuthError::Forbidden)
            }
            Session::Unenforced(_) => Ok(()),
        }
    }
}

/// Pulls the raw token out of the request.
///
/// A non-empty session cookie wins. Otherwise the `Authorization` header must
/// use the `Bearer` scheme.
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Result<String, AuthError> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(cookie_name) {
        if !cookie.value().is_empty() {
            return Ok(cookie.value().to_string());
        }
    }

    let Some(value) = headers.get(AUTHORIZATION) else {
        return Err(AuthError::MissingToken);
    };
    let value = value.to_str().map_err(|_| AuthError::MalformedHeader)?;
    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MalformedHeader)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token.to_string())
}

/// Authenticates a request at the current time.
pub fn authenticate(
    headers: &HeaderMap,
    security: &SecurityConfig,
    cookie: &CookieConfig,
) -> Result<Session, AuthError> {
    authenticate_at(headers, security, cookie, Utc::now().timestamp())
}

/// Authenticates a request as of `now` (Unix seconds).
pub fn authenticate_at(
    headers: &HeaderMap,
    security: &SecurityConfig,
    cookie: &CookieConfig,
    now: i64,
) -> Result<Session, AuthError> {
    if !security.enforce {
        let claims = extract_token(headers, &cookie.name)
            .ok()
            .and_then(|token| decode_token(&token, &security.secret).ok());
        return Ok(Session::Unenforced(claims));
    }

    verify(headers, security, cookie, now)
        .map(Session::Verified)
        .inspect_err(|e| warn!(reason = e.reason(), "Rejected session token"))
}

fn verify(
    headers: &HeaderMap,
    security: &SecurityConfig,
    cookie: &CookieConfig,
    now: i64,
) -> Result<Claims, AuthError> {
    let token = extract_token(headers, &cookie.name)?;
    let claims = decode_token(&token, &security.secret).map_err(|_| AuthError::InvalidToken)?;

    if now > claims.exp {
        return Err(AuthError::TokenExpired);
    }
    if now < claims.nbf {
        return Err(AuthError::TokenNotYetValid);
    }
    Ok(claims)
}
