use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use tracing::info;

const DROP_SCHEMA: &str = r#"
DROP TABLE IF EXISTS messages;
DROP TABLE IF EXISTS blogs;
DROP TABLE IF EXISTS users;
"#;

const CREATE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(name) <= 20),
    mail TEXT CHECK (mail IS NULL OR length(mail) <= 40),
    body TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS ix_messages_created_at ON messages (created_at);

CREATE TABLE IF NOT EXISTS blogs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL CHECK (length(title) <= 120),
    text TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS ix_blogs_created_at ON blogs (created_at);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE CHECK (length(username) <= 20),
    password_hash TEXT NOT NULL
);
"#;

pub(crate) async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("invalid DATABASE_URL: {database_url}"))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Full);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .with_context(|| format!("failed to open database {database_url}"))?;

    info!("database opened at {database_url}");
    Ok(pool)
}

/// Creates every table and index. With `drop_existing` the tables are
/// dropped first, discarding all rows.
pub(crate) async fn init_schema(pool: &SqlitePool, drop_existing: bool) -> Result<()> {
    let mut tx = pool.begin().await.context("failed to begin schema transaction")?;

    if drop_existing {
        sqlx::raw_sql(DROP_SCHEMA)
            .execute(&mut *tx)
            .await
            .context("failed to drop tables")?;
    }
    sqlx::raw_sql(CREATE_SCHEMA)
        .execute(&mut *tx)
        .await
        .context("failed to create tables")?;

    tx.commit().await.context("failed to commit schema")?;
    Ok(())
}

/// Single-connection in-memory database with the schema applied.
#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("in-memory url must parse");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("in-memory database must open");
    init_schema(&pool, false)
        .await
        .expect("schema must be created");
    pool
}
