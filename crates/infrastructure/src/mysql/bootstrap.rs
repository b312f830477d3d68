//! Pool creation and schema bootstrap.

use sqlx::mysql::{MySqlConnection, MySqlPoolOptions};
use sqlx::{Connection, MySqlPool};
use thiserror::Error;

use super::MySqlStoreConfig;

/// DDL for the single task table. Idempotent.
pub const CREATE_TASKS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS tasks (
    id BIGINT AUTO_INCREMENT PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    description TEXT NOT NULL,
    completed BOOLEAN NOT NULL DEFAULT FALSE,
    priority ENUM('low', 'medium', 'high') NOT NULL DEFAULT 'medium',
    due_date DATE NULL,
    categories VARCHAR(255) NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)
";

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to connect to MySQL: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("failed to create database '{database}': {source}")]
    CreateDatabase {
        database: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to create tasks table: {0}")]
    CreateTable(#[source] sqlx::Error),
}

/// Opens the pool and makes sure the database and table exist.
///
/// # Errors
///
/// Returns [`BootstrapError`] when the server is unreachable or a DDL
/// statement fails.
pub async fn connect(config: &MySqlStoreConfig) -> Result<MySqlPool, BootstrapError> {
    if config.url.is_none() {
        ensure_database(config).await?;
    }

    let options = config
        .database_options()
        .map_err(BootstrapError::Connection)?;

    let mut pool_options = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.connect_timeout);

    if let Some(idle_timeout) = config.idle_timeout {
        pool_options = pool_options.idle_timeout(idle_timeout);
    }

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(BootstrapError::Connection)?;

    ensure_schema(&pool).await?;

    tracing::info!(database = %config.database, "MySQL storage ready");

    Ok(pool)
}

async fn ensure_database(config: &MySqlStoreConfig) -> Result<(), BootstrapError> {
    let mut connection = MySqlConnection::connect_with(&config.server_options())
        .await
        .map_err(BootstrapError::Connection)?;

    // Validated against [A-Za-z0-9_] by the configuration layer.
    let statement = format!("CREATE DATABASE IF NOT EXISTS `{}`", config.database);
    sqlx::query(&statement)
        .execute(&mut connection)
        .await
        .map_err(|source| BootstrapError::CreateDatabase {
            database: config.database.clone(),
            source,
        })?;

    if let Err(error) = connection.close().await {
        tracing::warn!("Failed to close bootstrap connection: {}", error);
    }

    Ok(())
}

/// Creates the task table when it is missing.
///
/// # Errors
///
/// Returns [`BootstrapError::CreateTable`] when the DDL fails.
pub async fn ensure_schema(pool: &MySqlPool) -> Result<(), BootstrapError> {
    sqlx::query(CREATE_TASKS_TABLE)
        .execute(pool)
        .await
        .map_err(BootstrapError::CreateTable)?;
    Ok(())
}
