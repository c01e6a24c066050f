//! Core library surface for the Employee Manager TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as the integration tests can reuse the same pieces:
//! a SQLite-backed record store and the Ratatui window that fronts it.
pub mod db;
pub mod models;
pub mod ui;

/// Convenience re-exports for the persistence layer. These functions are
/// typically used by `main.rs` to open the embedded SQLite store and preload
/// data, and by tests to drive the store without a terminal.
pub use db::{close_store, default_store_path, fetch_employees, open_store};

/// The domain type that other layers manipulate.
pub use models::Employee;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
