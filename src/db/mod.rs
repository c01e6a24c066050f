//! Persistence module split across logical submodules.

mod connection;
mod employees;

pub use connection::{close_store, default_store_path, open_store};
pub use employees::{create_employee, delete_employee, fetch_employees, update_employee};
