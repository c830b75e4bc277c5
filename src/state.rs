use std::sync::Arc;

use lemon_config::{CookieConfig, CorsConfig, SecurityConfig};
use lemon_db::{
    AccountRepository, FeedbackRepository, PgAccountRepository, PgFeedbackRepository, PgPool,
};

/// Shared handler state.
///
/// Stores are held behind trait objects so the same router serves both the
/// Postgres backend and the in-memory stores used in tests.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountRepository>,
    pub feedback: Arc<dyn FeedbackRepository>,
    pub security: Arc<SecurityConfig>,
    pub cookie: CookieConfig,
    pub cors: CorsConfig,
}

impl AppState {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        feedback: Arc<dyn FeedbackRepository>,
        security: SecurityConfig,
        cookie: CookieConfig,
        cors: CorsConfig,
    ) -> Self {
        Self {
            accounts,
            feedback,
            security: Arc::new(security),
            cookie,
            cors,
        }
    }

    /// State backed by Postgres, with configuration read from the environment.
    pub fn from_pool(pool: PgPool, security: SecurityConfig) -> Self {
        Self::new(
            Arc::new(PgAccountRepository::new(pool.clone())),
            Arc::new(PgFeedbackRepository::new(pool)),
            security,
            CookieConfig::from_env(),
            CorsConfig::from_env(),
        )
    }
}
