//! Database row types. These map directly to SQLite rows and are kept
//! distinct from the roster-types wire models.

use std::fmt;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    /// Stored and compared verbatim.
    pub password: String,
    /// Unix seconds.
    pub last_login: i64,
    pub is_admin: bool,
    pub is_active: bool,
}

impl UserRow {
    pub fn session_state(&self) -> SessionState {
        if self.is_active {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        }
    }
}

// Keeps passwords out of log lines.
impl fmt::Debug for UserRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRow")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("last_login", &self.last_login)
            .field("is_admin", &self.is_admin)
            .field("is_active", &self.is_active)
            .finish_non_exhaustive()
    }
}

/// Fields a caller may choose when adding a user. The store assigns the id,
/// stamps `last_login`, and starts every account logged out.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}
