use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::Connection;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".employee-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "employees.sqlite";

/// Open the store at `path`, or an ephemeral in-memory store when no path is
/// given, and run the lazy migration. Safe to call on every startup: the
/// schema statement is `IF NOT EXISTS` and an existing database is reused
/// as-is.
pub fn open_store(path: Option<&Path>) -> Result<Connection> {
    let conn = match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).context("failed to create data directory")?;
            }
            Connection::open(path).context("failed to open SQLite database")?
        }
        None => Connection::open_in_memory().context("failed to open in-memory database")?,
    };

    conn.execute(
        "CREATE TABLE IF NOT EXISTS employees (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            position TEXT NOT NULL
        )",
        [],
    )
    .context("failed to create employees table")?;

    Ok(conn)
}

/// Release the underlying connection. Taking the `Connection` by value means
/// no further store operation can compile against a closed handle, so the
/// acquire-on-startup/release-on-shutdown pairing is enforced by the type
/// system rather than by process teardown.
pub fn close_store(conn: Connection) -> Result<()> {
    conn.close()
        .map_err(|(_, err)| err)
        .context("failed to close SQLite database")
}

/// Resolve the absolute path to the SQLite database inside the user's home.
pub fn default_store_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
