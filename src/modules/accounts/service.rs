use lemon_config::SecurityConfig;
use lemon_core::{StoreError, hash_credential};
use lemon_db::AccountRepository;
use lemon_models::{Account, UpdateSaveRequest};
use tracing::{info, instrument};

pub struct AccountService;

impl AccountService {
    #[instrument(skip(accounts))]
    pub async fn get_account(
        accounts: &dyn AccountRepository,
        account_id: &str,
    ) -> Result<Account, StoreError> {
        accounts.lookup_account_by_id(account_id).await
    }

    /// Replaces the save state, and the credential when a new password is
    /// supplied. The digest is recomputed with the current salt.
    #[instrument(skip(accounts, security, dto))]
    pub async fn update_save(
        accounts: &dyn AccountRepository,
        security: &SecurityConfig,
        account_id: &str,
        dto: UpdateSaveRequest,
    ) -> Result<Account, StoreError> {
        let mut account = accounts.lookup_account_by_id(account_id).await?;
        account.save_state = dto.save_state;
        if let Some(password) = dto.password {
            account.hash = hash_credential(&password, &security.salt, &account.username);
            info!("Credential replaced");
        }

        accounts.update_account(&account).await?;
        Ok(account)
    }

    #[instrument(skip(accounts))]
    pub async fn delete_account(
        accounts: &dyn AccountRepository,
        account_id: &str,
    ) -> Result<(), StoreError> {
        accounts.delete_account(account_id).await?;
        info!("Account deleted");
        Ok(())
    }
}
