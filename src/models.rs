//! Domain model that mirrors the SQLite schema and gets passed throughout the
//! TUI. The intent is that this type stays a light-weight data holder so other
//! layers can focus on presentation and persistence logic.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// In-memory representation of one row of the `employees` table.
pub struct Employee {
    /// Primary key from the SQLite store. The UI only needs display
    /// information, but edit/delete flows bubble the id back to the
    /// persistence layer, so we keep it around.
    pub id: i64,
    /// Employee name shown in the table. Non-empty by construction: the
    /// prompt flow refuses to submit blank input.
    pub name: String,
    /// Job position shown next to the name. Same non-emptiness guarantee.
    pub position: String,
}

impl fmt::Display for Employee {
    /// Write a `Name (Position)` summary to any formatter. Display keeps the
    /// type convenient for status messages and Ratatui widgets that consume
    /// strings implicitly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.position)
    }
}
