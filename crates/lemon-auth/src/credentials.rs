//! Registration and password login against the account store.

use lemon_config::SecurityConfig;
use lemon_core::{StoreError, hash_credential, verify_credential};
use lemon_db::AccountRepository;
use lemon_models::Account;
use tracing::{info, warn};

use crate::error::AuthError;

/// Checks `password` for `username` and returns the stored account.
///
/// # Errors
///
/// - [`AuthError::InvalidAccount`] when no account has that username
/// - [`AuthError::InvalidCredentials`] when the digest does not match
/// - [`AuthError::Store`] for any other store failure
pub async fn verify_login(
    accounts: &dyn AccountRepository,
    config: &SecurityConfig,
    username: &str,
    password: &str,
) -> Result<Account, AuthError> {
    let account = accounts
        .lookup_account_by_username(username)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => AuthError::InvalidAccount,
            other => AuthError::Store(other),
        })?;

    if !verify_credential(password, &account.username, &account.hash, &config.salt) {
        warn!(username = %username, "Login rejected: credential mismatch");
        return Err(AuthError::InvalidCredentials);
    }

    Ok(account)
}

/// Creates a `USER` account whose credential digest is derived from
/// `password`.
pub async fn register_account(
    accounts: &dyn AccountRepository,
    config: &SecurityConfig,
    username: &str,
    password: &str,
    save_state: &str,
) -> Result<Account, AuthError> {
    let hash = hash_credential(password, &config.salt, username);
    let mut account = Account::new(username, hash);
    account.save_state = save_state.to_string();

    accounts.persist_account(&account).await.map_err(|e| match e {
        StoreError::Conflict => AuthError::AccountExists,
        other => AuthError::Store(other),
    })?;

    info!(account_id = %account.id, username = %account.username, "Account registered");
    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lemon_db::memory::MemoryAccountRepository;
    use lemon_models::Role;

    fn config() -> SecurityConfig {
        SecurityConfig {
            secret: "jwt".to_string(),
            salt: "pepper".to_string(),
            enforce: true,
            elevation_secret: None,
            token_expiry: 60,
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let repo = MemoryAccountRepository::new();
        let registered = register_account(&repo, &config(), "alice", "password123", "{}")
            .await
            .unwrap();

        assert_eq!(registered.role, Role::User);
        assert_eq!(registered.save_state, "{}");
        assert_ne!(registered.hash, "password123");

        let account = verify_login(&repo, &config(), "alice", "password123")
            .await
            .unwrap();
        assert_eq!(account.id, registered.id);
    }

    #[tokio::test]
    async fn test_wrong_password_is_invalid_credentials() {
        let repo = MemoryAccountRepository::new();
        register_account(&repo, &config(), "alice", "password123", "")
            .await
            .unwrap();

        let result = verify_login(&repo, &config(), "alice", "password124").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_unknown_user_is_invalid_account() {
        let repo = MemoryAccountRepository::new();
        let result = verify_login(&repo, &config(), "nobody", "password123").await;
        assert!(matches!(result, Err(AuthError::InvalidAccount)));
    }

    #[tokio::test]
    async fn test_salt_change_invalidates_credentials() {
        let repo = MemoryAccountRepository::new();
        register_account(&repo, &config(), "alice", "password123", "")
            .await
            .unwrap();

        let rotated = SecurityConfig {
            salt: "different".to_string(),
            ..config()
        };
        let result = verify_login(&repo, &rotated, "alice", "password123").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_account_exists() {
        let repo = MemoryAccountRepository::new();
        register_account(&repo, &config(), "alice", "password123", "")
            .await
            .unwrap();

        let result = register_account(&repo, &config(), "alice", "otherpass1", "").await;
        assert!(matches!(result, Err(AuthError::AccountExists)));
    }
}
