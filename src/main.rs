use anyhow::Context;
use dotenvy::dotenv;
use lemon::logging::init_tracing;
use lemon::metrics::{init_metrics, metrics_app};
use lemon::router::init_router;
use lemon::state::AppState;
use lemon_config::{SecurityConfig, ServerConfig};
use lemon_db::{init_db_pool, run_migrations};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing().context("failed to create log directory")?;

    let security = SecurityConfig::from_env()?;
    security.validate()?;
    if !security.enforce {
        warn!("AUTH_ENFORCE is off: session checks will not reject any request");
    }

    let server = ServerConfig::from_env();
    let database_url = server
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set")?;

    let pool = init_db_pool(database_url)
        .await
        .context("failed to connect to database")?;
    run_migrations(&pool).await.context("failed to run migrations")?;

    let metrics = init_metrics().context("failed to install metrics recorder")?;
    let app = init_router(AppState::from_pool(pool, security)).merge(metrics_app(metrics));

    let address = server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    info!(%address, "Server listening");
    info!("Swagger UI at /swagger-ui, Scalar at /scalar, metrics at /metrics");
    axum::serve(listener, app).await?;

    Ok(())
}
