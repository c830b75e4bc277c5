use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lemon_core::{AppError, StoreError};

/// Failures of the token codec.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Signature did not verify, or the token declared a non-HMAC algorithm.
    #[error("token signature is invalid")]
    InvalidSignature,
    /// Not a JWT, or the claim set is missing fields or has mistyped ones.
    #[error("token is malformed")]
    Malformed,
    /// `nbf + lifetime` does not fit in a Unix timestamp.
    #[error("token expiry is out of range")]
    ExpiryOutOfRange,
    #[error("failed to encode token: {0}")]
    Encoding(#[source] jsonwebtoken::errors::Error),
}

/// Rejections produced by authentication, login, registration and elevation.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing token")]
    MissingToken,
    #[error("malformed authorization header")]
    MalformedHeader,
    #[error("invalid token")]
    InvalidToken,
    #[error("token has expired")]
    TokenExpired,
    #[error("token not yet valid")]
    TokenNotYetValid,
    #[error("invalid account")]
    InvalidAccount,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("forbidden")]
    Forbidden,
    #[error("account already exists")]
    AccountExists,
    #[error("failed to issue token")]
    TokenIssue(#[source] TokenError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken
            | AuthError::MalformedHeader
            | AuthError::InvalidToken
            | AuthError::TokenExpired
            | AuthError::TokenNotYetValid
            | AuthError::InvalidAccount
            | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::AccountExists => StatusCode::CONFLICT,
            AuthError::TokenIssue(_) | AuthError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "missing_token",
            AuthError::MalformedHeader => "malformed_header",
            AuthError::InvalidToken => "invalid_token",
            AuthError::TokenExpired => "token_expired",
            AuthError::TokenNotYetValid => "token_not_yet_valid",
            AuthError::InvalidAccount => "invalid_account",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::Forbidden => "forbidden",
            AuthError::AccountExists => "account_exists",
            AuthError::TokenIssue(_) => "token_issue",
            AuthError::Store(_) => "store",
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::new(err.status_code(), err)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
