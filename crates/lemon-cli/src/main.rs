use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use lemon_cli::{create_account, promote};
use lemon_config::{SecurityConfig, ServerConfig};
use lemon_db::{PgAccountRepository, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "lemon-cli")]
#[command(about = "Lemon CLI - account administration for the Lemon API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    CreateAccount {
        /// Username (prompted if omitted)
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Password (prompted securely if omitted)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Create the account with the DEVELOPER role
        #[arg(long)]
        developer: bool,
    },
    /// Promote an existing account to DEVELOPER
    Promote {
        /// Username of the account to promote
        username: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let database_url = ServerConfig::from_env()
        .database_url
        .context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_url)
        .await
        .context("failed to connect to database")?;
    run_migrations(&pool).await.context("failed to run migrations")?;
    let accounts = PgAccountRepository::new(pool);

    match cli.command {
        Commands::CreateAccount {
            username,
            password,
            developer,
        } => {
            let username = match username {
                Some(u) => u,
                None => Input::new().with_prompt("Username").interact_text()?,
            };
            let password = match password {
                Some(p) => p,
                None => Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords don't match")
                    .interact()?,
            };

            let security = SecurityConfig::from_env()?;
            let account = create_account(
                &accounts,
                &security,
                &username,
                &password,
                developer,
            )
            .await?;
            println!("✅ Account created");
            println!("   Username: {}", account.username);
            println!("   Role: {}", account.role);
        }
        Commands::Promote { username } => {
            let account = promote(&accounts, &username).await?;
            println!("✅ {} is now {}", account.username, account.role);
        }
    }

    Ok(())
}
