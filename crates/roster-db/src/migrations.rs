use rusqlite::Connection;
use tracing::info;

use crate::Result;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        username    TEXT NOT NULL,
        password    TEXT NOT NULL,
        last_login  INTEGER NOT NULL,
        admin       INTEGER NOT NULL DEFAULT 0,
        active      INTEGER NOT NULL DEFAULT 0
    );

    -- Usernames are not unique; lookups take the lowest id.
    CREATE INDEX IF NOT EXISTS idx_users_username
        ON users(username, id);
";

/// Non-destructive: creates the table on a fresh file, leaves existing rows alone.
pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;

    info!("Database migrations complete");
    Ok(())
}

/// Drops the users table and recreates it empty.
pub fn reset(conn: &Connection) -> Result<()> {
    info!("Emptying users table");
    conn.execute_batch("DROP TABLE IF EXISTS users;")?;
    run(conn)
}
