//! Storage adapters for the todo manager.
//!
//! [`TaskRepository`] is the port the HTTP layer depends on. Two adapters
//! implement it: [`MySqlTaskRepository`] for production and
//! [`InMemoryTaskRepository`] for development and tests.
//! [`RepositoryFactory`] picks one from configuration at startup.

pub mod factory;
pub mod in_memory;
pub mod mysql;
pub mod repository;

pub use factory::{
    ConfigurationError, FactoryError, RepositoryConfig, RepositoryConfigBuilder,
    RepositoryFactory, StorageMode,
};
pub use in_memory::InMemoryTaskRepository;
pub use mysql::{MySqlStoreConfig, MySqlTaskRepository};
pub use repository::{RepositoryError, RepositoryFuture, TaskRepository};
