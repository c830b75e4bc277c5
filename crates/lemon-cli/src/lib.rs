//! # Lemon CLI
//!
//! Operator commands that work directly against the account store,
//! bypassing the HTTP surface.
//!
//! - [`create_account`]: register an account, optionally already promoted
//! - [`promote`]: set an existing account's role to `DEVELOPER`

use lemon_auth::{AuthError, register_account};
use lemon_config::SecurityConfig;
use lemon_core::StoreError;
use lemon_db::AccountRepository;
use lemon_models::{Account, Role};

/// Creates an account with the same credential digest the server would
/// compute at registration. With `developer` the account is promoted
/// straight away.
pub async fn create_account(
    accounts: &dyn AccountRepository,
    security: &SecurityConfig,
    username: &str,
    password: &str,
    developer: bool,
) -> Result<Account, AuthError> {
    let mut account = register_account(accounts, security, username, password, "").await?;
    if developer {
        accounts
            .update_account_role(&account.id, Role::Developer)
            .await?;
        account.role = Role::Developer;
    }
    Ok(account)
}

/// Promotes the account named `username`. Already-promoted accounts are left
/// as they are.
pub async fn promote(
    accounts: &dyn AccountRepository,
    username: &str,
) -> Result<Account, StoreError> {
    let mut account = accounts.lookup_account_by_username(username).await?;
    if account.role != Role::Developer {
        accounts
            .update_account_role(&account.id, Role::Developer)
            .await?;
        account.role = Role::Developer;
    }
    Ok(account)
}
