use async_trait::async_trait;
use lemon_core::StoreError;
use lemon_models::{Account, Role};

/// Account persistence consumed by the authentication core.
///
/// Implementations apply each call atomically per account; callers get no
/// compare-and-swap, so concurrent writers resolve as last write wins.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn lookup_account_by_username(&self, username: &str) -> Result<Account, StoreError>;

    async fn lookup_account_by_id(&self, id: &str) -> Result<Account, StoreError>;

    /// Inserts a new account. A taken username yields [`StoreError::Conflict`].
    async fn persist_account(&self, account: &Account) -> Result<(), StoreError>;

    /// Writes the credential hash and save state of an existing account.
    async fn update_account(&self, account: &Account) -> Result<(), StoreError>;

    async fn update_account_role(&self, id: &str, role: Role) -> Result<(), StoreError>;

    async fn delete_account(&self, id: &str) -> Result<(), StoreError>;
}
