//! Binary entry point that glues the SQLite-backed record store to the TUI:
//! open the database, hydrate the initial window state, drive the Ratatui
//! event loop until the user exits, then release the connection explicitly
//! instead of leaning on process teardown.
use employee_manager::{
    close_store, default_store_path, fetch_employees, open_store, run_app, App,
};

/// Open persistence, load the current records, and launch the Ratatui event
/// loop. Returning a `Result` bubbles up fatal problems (an unreadable home
/// directory, a corrupt database) to the terminal instead of crashing
/// silently; a normal window close exits with code 0.
fn main() -> anyhow::Result<()> {
    let db_path = default_store_path()?;
    let conn = open_store(Some(&db_path))?;
    let employees = fetch_employees(&conn)?;

    let mut app = App::new(conn, employees);
    let result = run_app(&mut app);

    close_store(app.into_store())?;
    result
}
