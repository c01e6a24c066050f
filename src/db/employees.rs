use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::models::Employee;

/// Retrieve every employee in id order. SQLite assigns ids monotonically
/// here, so this doubles as insertion order, and the query is the single
/// source of truth for how the table view orders its rows.
pub fn fetch_employees(conn: &Connection) -> Result<Vec<Employee>> {
    let mut stmt = conn
        .prepare("SELECT id, name, position FROM employees ORDER BY id")
        .context("failed to prepare employee query")?;

    let employees = stmt
        .query_map([], |row| {
            Ok(Employee {
                id: row.get(0)?,
                name: row.get(1)?,
                position: row.get(2)?,
            })
        })
        .context("failed to iterate employees")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect employees")?;

    Ok(employees)
}

/// Insert a new employee row, returning the hydrated struct so the caller can
/// learn the assigned id without re-querying the database. The insert commits
/// immediately; there is no deferred transaction.
pub fn create_employee(conn: &Connection, name: &str, position: &str) -> Result<Employee> {
    conn.execute(
        "INSERT INTO employees (name, position) VALUES (?1, ?2)",
        params![name, position],
    )
    .context("failed to insert employee")?;

    let id = conn.last_insert_rowid();
    Ok(Employee {
        id,
        name: name.to_string(),
        position: position.to_string(),
    })
}

/// Overwrite name and position for the row matching `id`. A missing id is a
/// silent no-op: the caller already refreshes its view from the store, so
/// a row deleted out from under an edit simply stays gone.
pub fn update_employee(conn: &Connection, id: i64, name: &str, position: &str) -> Result<()> {
    conn.execute(
        "UPDATE employees SET name = ?1, position = ?2 WHERE id = ?3",
        params![name, position, id],
    )
    .context("failed to update employee")?;
    Ok(())
}

/// Remove the row matching `id`. Like `update_employee`, absent ids are a
/// silent no-op.
pub fn delete_employee(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("DELETE FROM employees WHERE id = ?1", params![id])
        .context("failed to delete employee")?;
    Ok(())
}
