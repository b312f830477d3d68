//! Runtime selection of the storage backend.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `mysql` (default) | `in_memory`
//! - `DATABASE_URL`: full MySQL URL; overrides the `DB_*` variables
//! - `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`
//! - `DB_MAX_CONNECTIONS`

use std::env;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::in_memory::InMemoryTaskRepository;
use crate::mysql::{self, BootstrapError, MySqlStoreConfig, MySqlTaskRepository};
use crate::repository::TaskRepository;

// =============================================================================
// Configuration Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Process-local storage, lost on restart.
    InMemory,
    #[default]
    MySql,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "mysql" => Ok(Self::MySql),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Invalid STORAGE_MODE: '{0}'. Expected 'mysql' or 'in_memory'")]
    InvalidStorageMode(String),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidNumber { key: &'static str, value: String },

    #[error("Invalid database name '{0}': only letters, digits and '_' are allowed")]
    InvalidDatabaseName(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryConfig {
    pub storage_mode: StorageMode,
    pub mysql: MySqlStoreConfig,
}

/// Reads a variable, treating empty and whitespace-only values as unset.
fn non_blank(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_number<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigurationError> {
    non_blank(lookup, key)
        .map(|value| {
            value
                .parse()
                .map_err(|_| ConfigurationError::InvalidNumber { key, value })
        })
        .transpose()
}

impl RepositoryConfig {
    pub fn builder() -> RepositoryConfigBuilder {
        RepositoryConfigBuilder::default()
    }

    /// Loads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// See [`RepositoryConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration from an arbitrary key/value source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if `STORAGE_MODE` is unknown, a numeric
    /// variable does not parse, or `DB_NAME` is not a plain identifier.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigurationError> {
        let storage_mode = non_blank(&lookup, "STORAGE_MODE")
            .map(|value| value.parse::<StorageMode>())
            .transpose()?
            .unwrap_or_default();

        let defaults = MySqlStoreConfig::default();
        let mysql = MySqlStoreConfig {
            url: non_blank(&lookup, "DATABASE_URL"),
            host: non_blank(&lookup, "DB_HOST").unwrap_or(defaults.host),
            port: parse_number(&lookup, "DB_PORT")?.unwrap_or(defaults.port),
            user: non_blank(&lookup, "DB_USER").unwrap_or(defaults.user),
            password: lookup("DB_PASSWORD").unwrap_or(defaults.password),
            database: non_blank(&lookup, "DB_NAME").unwrap_or(defaults.database),
            max_connections: parse_number(&lookup, "DB_MAX_CONNECTIONS")?
                .unwrap_or(defaults.max_connections),
            ..defaults
        };

        let config = Self {
            storage_mode,
            mysql,
        };
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidDatabaseName` when MySQL storage is
    /// selected with a database name that cannot be created safely.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.storage_mode == StorageMode::MySql
            && self.mysql.url.is_none()
            && !self.mysql.has_valid_database_name()
        {
            return Err(ConfigurationError::InvalidDatabaseName(
                self.mysql.database.clone(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RepositoryConfigBuilder {
    storage_mode: StorageMode,
    mysql: MySqlStoreConfig,
}

impl RepositoryConfigBuilder {
    #[must_use]
    pub const fn storage_mode(mut self, mode: StorageMode) -> Self {
        self.storage_mode = mode;
        self
    }

    #[must_use]
    pub fn mysql(mut self, mysql: MySqlStoreConfig) -> Self {
        self.mysql = mysql;
        self
    }

    /// # Errors
    ///
    /// Returns `ConfigurationError` if the configuration is invalid.
    pub fn build(self) -> Result<RepositoryConfig, ConfigurationError> {
        let config = RepositoryConfig {
            storage_mode: self.storage_mode,
            mysql: self.mysql,
        };
        config.validate()?;
        Ok(config)
    }
}

// =============================================================================
// Factory
// =============================================================================

#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Database connection failed: {0}")]
    DatabaseConnection(String),

    #[error("Schema bootstrap failed: {0}")]
    SchemaBootstrap(String),
}

impl From<BootstrapError> for FactoryError {
    fn from(error: BootstrapError) -> Self {
        match error {
            BootstrapError::Connection(_) => Self::DatabaseConnection(error.to_string()),
            BootstrapError::CreateDatabase { .. } | BootstrapError::CreateTable(_) => {
                Self::SchemaBootstrap(error.to_string())
            }
        }
    }
}

pub struct RepositoryFactory {
    config: RepositoryConfig,
}

impl RepositoryFactory {
    #[must_use]
    pub const fn new(config: RepositoryConfig) -> Self {
        Self { config }
    }

    /// Builds the configured repository, bootstrapping MySQL if selected.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError` when the configuration is invalid or the
    /// database cannot be reached or prepared.
    pub async fn create(&self) -> Result<Arc<dyn TaskRepository>, FactoryError> {
        self.config.validate()?;

        match self.config.storage_mode {
            StorageMode::InMemory => {
                tracing::info!("Using in-memory task storage");
                Ok(Arc::new(InMemoryTaskRepository::new()))
            }
            StorageMode::MySql => {
                tracing::info!(
                    host = %self.config.mysql.host,
                    database = %self.config.mysql.database,
                    "Connecting to MySQL task storage"
                );
                let pool = mysql::connect(&self.config.mysql).await?;
                Ok(Arc::new(MySqlTaskRepository::new(pool)))
            }
        }
    }
}
