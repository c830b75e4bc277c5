use lemon_auth::{AuthError, Elevation, issue_token, register_account, verify_login};
use lemon_config::SecurityConfig;
use lemon_core::StoreError;
use lemon_db::AccountRepository;
use lemon_models::{Account, LoginRequest, RegisterRequest};
use tracing::instrument;

use crate::metrics::{
    track_elevation, track_login_failure, track_login_success, track_registration,
    track_token_issued,
};

pub struct AuthService;

impl AuthService {
    #[instrument(skip_all, fields(username = %dto.username))]
    pub async fn register(
        accounts: &dyn AccountRepository,
        security: &SecurityConfig,
        dto: RegisterRequest,
    ) -> Result<(Account, String), AuthError> {
        let account =
            register_account(accounts, security, &dto.username, &dto.password, &dto.save_state)
                .await?;
        track_registration();

        let token = issue_token(&account, security).map_err(AuthError::TokenIssue)?;
        track_token_issued("register");
        Ok((account, token))
    }

    #[instrument(skip_all, fields(username = %dto.username))]
    pub async fn login(
        accounts: &dyn AccountRepository,
        security: &SecurityConfig,
        dto: LoginRequest,
    ) -> Result<(Account, String), AuthError> {
        let account = verify_login(accounts, security, &dto.username, &dto.password)
            .await
            .inspect_err(|e| track_login_failure(e.reason()))?;
        track_login_success(account.role.as_str());

        let token = issue_token(&account, security).map_err(AuthError::TokenIssue)?;
        track_token_issued("login");
        Ok((account, token))
    }

    #[instrument(skip(accounts))]
    pub async fn is_username_taken(
        accounts: &dyn AccountRepository,
        username: &str,
    ) -> Result<bool, StoreError> {
        match accounts.lookup_account_by_username(username).await {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(accounts, security, secret))]
    pub async fn elevate(
        accounts: &dyn AccountRepository,
        security: &SecurityConfig,
        account_id: &str,
        secret: &str,
    ) -> Result<Elevation, AuthError> {
        let result = lemon_auth::elevate(accounts, security, account_id, secret).await;
        match &result {
            Ok(_) => {
                track_elevation(true);
                track_token_issued("elevate");
            }
            Err(AuthError::Forbidden) => track_elevation(false),
            Err(_) => {}
        }
        result
    }
}
