//! Login and logout transitions.
//!
//! Each transition is a credential check followed by a full-row overwrite.
//! The two steps are separate round-trips, so concurrent transitions on one
//! account race and the last write wins.

use tracing::info;

use crate::access::Role;
use crate::models::UserRow;
use crate::{AccessError, Database};

impl Database {
    /// LoggedOut -> LoggedIn. Marks the session open and stamps `last_login`.
    pub fn login(&self, username: &str, password: &str) -> Result<UserRow, AccessError> {
        let mut user = self.authorize(username, password, Role::Account)?;
        let from = user.session_state();

        // Never move the stamp backwards if the clock did.
        user.last_login = chrono::Utc::now().timestamp().max(user.last_login);
        user.is_active = true;
        self.update_user(&user)?;

        info!("User {} logged in ({:?} -> {:?})", user.username, from, user.session_state());
        Ok(user)
    }

    /// LoggedIn -> LoggedOut. `last_login` is left untouched.
    pub fn logout(&self, username: &str, password: &str) -> Result<UserRow, AccessError> {
        let mut user = self.authorize(username, password, Role::Account)?;
        let from = user.session_state();

        user.is_active = false;
        self.update_user(&user)?;

        info!("User {} logged out ({:?} -> {:?})", user.username, from, user.session_state());
        Ok(user)
    }
}
