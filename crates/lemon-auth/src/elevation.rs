//! Promotion of an account to `DEVELOPER` with a shared secret.

use lemon_config::SecurityConfig;
use lemon_core::StoreError;
use lemon_db::AccountRepository;
use lemon_models::{Account, Role};
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use crate::error::AuthError;
use crate::jwt::issue_token;

/// A promoted account and the fresh token that reflects its new role.
#[derive(Debug, Clone)]
pub struct Elevation {
    pub account: Account,
    pub token: String,
}

/// Promotes `account_id` when `presented` matches the configured elevation
/// secret.
///
/// A mismatch, or no configured secret, yields [`AuthError::Forbidden`] and
/// leaves the account untouched. Promotion is one-way.
pub async fn elevate(
    accounts: &dyn AccountRepository,
    config: &SecurityConfig,
    account_id: &str,
    presented: &str,
) -> Result<Elevation, AuthError> {
    let mut account = accounts
        .lookup_account_by_id(account_id)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => AuthError::InvalidAccount,
            other => AuthError::Store(other),
        })?;

    let authorized = config
        .elevation_secret
        .as_deref()
        .is_some_and(|expected| bool::from(expected.as_bytes().ct_eq(presented.as_bytes())));
    if !authorized {
        warn!(account_id = %account_id, "Elevation rejected");
        return Err(AuthError::Forbidden);
    }

    accounts
        .update_account_role(&account.id, Role::Developer)
        .await?;
    account.role = Role::Developer;

    let token = issue_token(&account, config).map_err(AuthError::TokenIssue)?;
    info!(account_id = %account.id, "Account elevated to developer");

    Ok(Elevation { account, token })
}
