pub mod access;
pub mod error;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod session;

pub use access::Role;
pub use error::{AccessError, Result, StoreError};
pub use models::{NewUser, SessionState, UserRow};

use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// Handle to the user directory. The backing file location is fixed at
/// construction; there is no process-wide store path.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;

        migrations::run(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// All store calls serialize on this one connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        f(&conn)
    }
}

#[cfg(test)]
pub(crate) fn scratch_db() -> (tempfile::TempDir, Database) {
    let dir = tempfile::TempDir::new().unwrap();
    let db = Database::open(&dir.path().join("users.db")).unwrap();
    (dir, db)
}
