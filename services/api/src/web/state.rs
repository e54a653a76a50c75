//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use bookstore_core::ports::DatabaseService;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
///
/// Holds no per-request data: the database port hands out a pooled connection
/// for each operation.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn DatabaseService>,
}
