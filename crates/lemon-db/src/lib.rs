//! # Lemon DB
//!
//! Persistence collaborators for the Lemon API.
//!
//! The authentication core only ever talks to the [`AccountRepository`] and
//! [`FeedbackRepository`] traits. Two families of implementations exist:
//!
//! - [`postgres`]: SQLx-backed stores used by the server and CLI
//! - `memory`: in-process stores for tests (`test-utils` feature)
//!
//! # Example
//!
//! ```ignore
//! use lemon_db::{init_db_pool, run_migrations, PgAccountRepository};
//!
//! let pool = init_db_pool(&database_url).await?;
//! run_migrations(&pool).await?;
//! let accounts = PgAccountRepository::new(pool.clone());
//! ```

pub mod accounts;
pub mod feedback;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;

pub use accounts::AccountRepository;
pub use feedback::FeedbackRepository;
pub use postgres::{PgAccountRepository, PgFeedbackRepository};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

use sqlx::postgres::PgPoolOptions;

/// Opens a PostgreSQL connection pool.
///
/// Called once at startup; the returned pool is cheaply cloneable.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

/// Applies the schema in `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
