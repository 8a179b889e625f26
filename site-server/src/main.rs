use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sqlx::SqlitePool;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::auth_service::AuthService;
use data::repositories::sqlite::user_repository::SqliteUserRepository;
use domain::user::{CreateUserRequest, User};
use infrastructure::database::{create_pool, init_schema};
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::settings::{BaseSettings, Settings};
use presentation::{AppState, SiteConfig};

#[derive(Debug, Parser)]
#[command(name = "site-server", version, about = "Guestbook and blog server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create missing tables and start the HTTP server (default).
    Serve,
    /// Create the tables.
    Initdb {
        /// Drop existing tables first.
        #[arg(long)]
        drop: bool,
    },
    /// Accepted for compatibility; nothing is cached.
    DeleteCache,
    /// Create an admin account for the management interface.
    CreateAdmin {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Initdb { drop } => initdb(drop).await,
        Command::DeleteCache => Ok(()),
        Command::CreateAdmin { username, password } => create_admin(username, password).await,
    }
}

async fn serve() -> Result<()> {
    let settings = Settings::from_env()?;
    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url).await?;
    init_schema(&pool, false).await?;

    let jwt = JwtService::new(&settings.jwt_secret, settings.jwt_ttl_seconds);
    let state = AppState::new(pool, jwt, SiteConfig::from(&settings));

    server::run_http(&settings, state).await
}

async fn initdb(drop_existing: bool) -> Result<()> {
    let settings = BaseSettings::from_env()?;
    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url).await?;
    init_schema(&pool, drop_existing).await?;

    println!("Initialized database.");
    Ok(())
}

async fn create_admin(username: String, password: String) -> Result<()> {
    let settings = BaseSettings::from_env()?;
    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url).await?;
    init_schema(&pool, false).await?;

    let user = create_admin_user(pool, username, password).await?;
    println!("Created admin user {}.", user.username);
    Ok(())
}

/// Account creation issues no token, so no signing secret is needed.
async fn create_admin_user(pool: SqlitePool, username: String, password: String) -> Result<User> {
    let auth = AuthService::new(SqliteUserRepository::new(pool), JwtService::new("", 0));
    let user = auth
        .create_user(CreateUserRequest { username, password })
        .await
        .context("failed to create admin user")?;

    info!(user_id = user.id, username = %user.username, "admin user created");
    Ok(user)
}
