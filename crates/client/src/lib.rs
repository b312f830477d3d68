//! Client side of the todo manager.
//!
//! - [`gateway`]: HTTP calls to the task API, with every failure collapsed
//!   into a sentinel (`None`, `false`, empty list).
//! - [`view`]: pure filtering, sorting and summary rules over a task list.
//! - [`board`]: the stateful [`TaskBoard`] a UI drives, including optimistic
//!   toggle/delete with rollback.
//! - [`form`]: the create/edit form model and its validation.

pub mod board;
pub mod config;
pub mod form;
pub mod gateway;
pub mod view;

pub use board::{FormState, Notice, NoticeKind, TaskBoard};
pub use config::{GatewayConfig, GatewayConfigError};
pub use form::{CATEGORY_CHOICES, TaskDraft, TaskForm};
pub use gateway::{HttpTaskGateway, TaskGateway};
pub use view::{DueHighlight, SortKey, StatusFilter, TaskCount, ViewFilters};
