//! services/api/src/lib.rs
//!
//! The bookstore HTTP service: configuration, the SQLite adapter for the core
//! `DatabaseService` port, and the axum web layer.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
