//! HTTP layer for the todo manager.
//!
//! Exposes task CRUD over JSON, maps repository outcomes to status codes and
//! keeps store failure details out of responses.

pub mod config;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
