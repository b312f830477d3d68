//! MySQL storage adapter.

mod bootstrap;
mod config;
mod repository;

pub use bootstrap::{BootstrapError, CREATE_TASKS_TABLE, connect, ensure_schema};
pub use config::MySqlStoreConfig;
pub use repository::MySqlTaskRepository;
