use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::PreferencesError;

/// Persisted named flags, used to run one-time migrations once per install.
///
/// A migration whose logic changes gets a new flag name; the old name is
/// cleared and the new one checked, so the migration runs once more.
pub struct Preferences {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl Preferences {
    /// Open (or create) the preferences database at `path`
    pub fn open(path: &Path) -> Result<Self, PreferencesError> {
        // Ensure the parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| PreferencesError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path)?;
        debug!("📁 Preferences opened at: {}", path.display());

        let prefs = Preferences {
            conn,
            db_path: Some(path.to_path_buf()),
        };
        prefs.init_schema()?;
        Ok(prefs)
    }

    /// Preferences that vanish with the process
    pub fn open_in_memory() -> Result<Self, PreferencesError> {
        let prefs = Preferences {
            conn: Connection::open_in_memory()?,
            db_path: None,
        };
        prefs.init_schema()?;
        Ok(prefs)
    }

    fn init_schema(&self) -> Result<(), PreferencesError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS flags (
                name            TEXT PRIMARY KEY,
                set_at          INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Path to the database file, None when in memory
    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    pub fn is_set(&self, name: &str) -> Result<bool, PreferencesError> {
        Ok(self.set_at(name)?.is_some())
    }

    /// When the flag was set, as a Unix timestamp
    pub fn set_at(&self, name: &str) -> Result<Option<i64>, PreferencesError> {
        let found = self
            .conn
            .query_row("SELECT set_at FROM flags WHERE name = ?1", params![name], |row| row.get(0))
            .optional()?;
        Ok(found)
    }

    pub fn set(&self, name: &str) -> Result<(), PreferencesError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO flags (name, set_at) VALUES (?1, ?2)",
            params![name, chrono::Utc::now().timestamp()],
        )?;
        Ok(())
    }

    /// Clearing a flag that was never set is fine
    pub fn clear(&self, name: &str) -> Result<(), PreferencesError> {
        self.conn
            .execute("DELETE FROM flags WHERE name = ?1", params![name])?;
        Ok(())
    }
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences")
            .field("db_path", &self.db_path)
            .finish()
    }
}
