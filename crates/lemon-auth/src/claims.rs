//! The claim set embedded in session tokens.

use lemon_models::{Account, Role};
use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// Issuer written into every token this service signs.
pub const ISSUER: &str = "https://lemon.indiedev.io";

/// Audience written into every token this service signs.
pub const AUDIENCE: &str = "https://lemon.indiedev.io";

/// Claims carried by a session token.
///
/// Decoding fails when any field is missing or has the wrong type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer
    pub iss: String,
    /// Expiry (Unix seconds)
    pub exp: i64,
    /// Subject: the account identifier
    pub sub: String,
    /// Audience
    pub aud: String,
    /// Not-before (Unix seconds)
    pub nbf: i64,
    /// Account identifier, duplicated from `sub`
    pub id: String,
    /// Always false for tokens issued by login, registration, or elevation
    pub guest: bool,
    pub role: Role,
    /// Display name (the username)
    pub name: String,
}

impl Claims {
    /// Claims for `account` valid from `now` for `ttl` seconds.
    pub fn for_account(account: &Account, now: i64, ttl: i64) -> Result<Self, TokenError> {
        let exp = now.checked_add(ttl).ok_or(TokenError::ExpiryOutOfRange)?;
        Ok(Self {
            iss: ISSUER.to_string(),
            exp,
            sub: account.id.clone(),
            aud: AUDIENCE.to_string(),
            nbf: now,
            id: account.id.clone(),
            guest: false,
            role: account.role,
            name: account.username.clone(),
        })
    }
}
