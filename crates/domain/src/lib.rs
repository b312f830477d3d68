//! Domain layer for the todo manager.
//!
//! A single entity, [`Task`], plus the value types that describe how it is
//! created ([`NewTask`]) and partially updated ([`TaskPatch`]).

pub mod categories;
pub mod changes;
pub mod task;
pub mod validation;

pub use categories::{CATEGORY_DELIMITER, Categories};
pub use changes::{NewTask, TaskPatch};
pub use task::{Priority, PriorityParseError, Task, TaskId, TaskIdParseError};
pub use validation::{TitleError, validate_title};
