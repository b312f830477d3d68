//! MySQL connection settings.

use std::fmt;
use std::time::Duration;

use sqlx::mysql::MySqlConnectOptions;

/// Where and how to connect to MySQL.
///
/// Either a full `url` or the individual server fields are used. With the
/// individual fields the database is created on startup when missing; with a
/// `url` the database named in it must already exist.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use todo_infrastructure::MySqlStoreConfig;
///
/// let config = MySqlStoreConfig::default()
///     .with_host("db.internal")
///     .with_database("todos")
///     .with_max_connections(20)
///     .with_connect_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.port, 3306);
/// assert_eq!(config.max_connections, 20);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct MySqlStoreConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Option<Duration>,
}

impl Default for MySqlStoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            database: "todo_manager".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
        }
    }
}

impl MySqlStoreConfig {
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = user.into();
        self.password = password.into();
        self
    }

    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    #[must_use]
    pub const fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    #[must_use]
    pub const fn with_min_connections(mut self, min_connections: u32) -> Self {
        self.min_connections = min_connections;
        self
    }

    #[must_use]
    pub const fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    #[must_use]
    pub const fn with_idle_timeout(mut self, idle_timeout: Option<Duration>) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Whether `database` is safe to splice into `CREATE DATABASE`.
    ///
    /// Identifiers cannot be bound as parameters, so only `[A-Za-z0-9_]` is
    /// accepted.
    #[must_use]
    pub fn has_valid_database_name(&self) -> bool {
        !self.database.is_empty()
            && self
                .database
                .chars()
                .all(|character| character.is_ascii_alphanumeric() || character == '_')
    }

    /// Options for a server-level connection, without selecting a database.
    #[must_use]
    pub fn server_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
    }

    /// Options for the pool: the parsed `url`, or the server fields plus
    /// `database`.
    ///
    /// # Errors
    ///
    /// Returns the sqlx parse error when `url` is malformed.
    pub fn database_options(&self) -> Result<MySqlConnectOptions, sqlx::Error> {
        match &self.url {
            Some(url) => url.parse(),
            None => Ok(self.server_options().database(&self.database)),
        }
    }
}

impl fmt::Debug for MySqlStoreConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MySqlStoreConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout", &self.connect_timeout)
            .field("idle_timeout", &self.idle_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults() {
        let config = MySqlStoreConfig::default();

        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 3306);
        assert_eq!(config.user, "root");
        assert_eq!(config.database, "todo_manager");
        assert_eq!(config.max_connections, 10);
        assert!(config.url.is_none());
    }

    #[rstest]
    #[case("todo_manager", true)]
    #[case("Todos2", true)]
    #[case("", false)]
    #[case("todo-manager", false)]
    #[case("x`; DROP DATABASE y", false)]
    fn database_name_validation(#[case] name: &str, #[case] expected: bool) {
        let config = MySqlStoreConfig::default().with_database(name);
        assert_eq!(config.has_valid_database_name(), expected);
    }

    #[rstest]
    fn debug_redacts_secrets() {
        let config = MySqlStoreConfig::default()
            .with_credentials("app", "hunter2")
            .with_url("mysql://app:hunter2@db/todos");

        let debug = format!("{config:?}");

        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("app"));
    }

    #[rstest]
    fn malformed_url_is_rejected() {
        let config = MySqlStoreConfig::default().with_url("not a url");
        assert!(config.database_options().is_err());
    }
}
