//! Database migration commands.
//!
//! # Environment Variables
//!
//! - `ADDRESS_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Migrations live in `crates/server/migrations/` and are embedded at
//! compile time.

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::migrate::Migrator;

static MIGRATOR: Migrator = sqlx::migrate!("../server/migrations");

/// `PostgreSQL` SQLSTATE for `undefined_table`.
const UNDEFINED_TABLE: &str = "42P01";

/// Errors from the migration commands.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Apply every pending migration.
///
/// # Errors
///
/// Returns `MigrationError` if the URL is missing, the database is
/// unreachable, or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let pool = connect().await?;

    tracing::info!("Running address migrations...");
    MIGRATOR.run(&pool).await?;
    pool.close().await;

    tracing::info!("Address migrations complete!");
    Ok(())
}

/// Log each known migration and whether it has been applied.
///
/// # Errors
///
/// Returns `MigrationError` if the URL is missing, the database is
/// unreachable, or the migrations table cannot be read.
pub async fn status() -> Result<(), MigrationError> {
    let pool = connect().await?;

    let applied = applied_versions(&pool).await;
    pool.close().await;
    let applied = applied?;

    for migration in MIGRATOR.iter() {
        tracing::info!(
            version = migration.version,
            description = %migration.description,
            applied = applied.contains(&migration.version),
            "migration"
        );
    }
    Ok(())
}

/// Versions recorded as successfully applied.
///
/// A database that has never been migrated has no `_sqlx_migrations` table;
/// that reads as nothing applied. Every other failure is returned.
async fn applied_versions(pool: &PgPool) -> Result<Vec<i64>, sqlx::Error> {
    let result: Result<Vec<i64>, sqlx::Error> =
        sqlx::query_scalar("SELECT version FROM _sqlx_migrations WHERE success ORDER BY version")
            .fetch_all(pool)
            .await;

    match result {
        Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(UNDEFINED_TABLE) => {
            Ok(Vec::new())
        }
        other => other,
    }
}

async fn connect() -> Result<PgPool, MigrationError> {
    let _ = dotenvy::dotenv();

    let database_url = database_url()?;
    tracing::info!("Connecting to address database...");
    Ok(PgPool::connect(database_url.expose_secret()).await?)
}

fn database_url() -> Result<SecretString, MigrationError> {
    std::env::var("ADDRESS_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| MigrationError::MissingEnvVar("ADDRESS_DATABASE_URL"))
}
