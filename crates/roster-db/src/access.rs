//! Credential checks against the directory.
//!
//! Passwords are compared verbatim against the stored value; there is no
//! hashing layer.

use tracing::{error, warn};

use crate::models::UserRow;
use crate::{AccessError, Database};

/// What a caller needs to be allowed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Any account whose credentials match.
    Account,
    /// A matching account with the admin flag set.
    Admin,
}

impl Database {
    /// Checks `username`/`password` and returns the matching record.
    ///
    /// Empty fields fail with [`AccessError::Validation`] before the store is
    /// touched. A missing user, a wrong password, or a non-admin asking for
    /// [`Role::Admin`] all fail the same way with [`AccessError::NotAuthorized`].
    pub fn authorize(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<UserRow, AccessError> {
        if username.is_empty() {
            return Err(AccessError::Validation("username"));
        }
        if password.is_empty() {
            return Err(AccessError::Validation("password"));
        }

        let user = self
            .get_user_by_username(username)?
            .ok_or(AccessError::NotAuthorized)?;

        if user.username != username || user.password != password {
            return Err(AccessError::NotAuthorized);
        }
        if role == Role::Admin && !user.is_admin {
            return Err(AccessError::NotAuthorized);
        }

        Ok(user)
    }

    pub fn is_valid_account(&self, username: &str, password: &str) -> bool {
        self.passes(username, password, Role::Account)
    }

    pub fn is_admin_account(&self, username: &str, password: &str) -> bool {
        self.passes(username, password, Role::Admin)
    }

    fn passes(&self, username: &str, password: &str, role: Role) -> bool {
        match self.authorize(username, password, role) {
            Ok(_) => true,
            Err(AccessError::Storage(e)) => {
                error!("Credential check for '{}' failed: {}", username, e);
                false
            }
            Err(e) => {
                warn!("Credential check for '{}' as {:?} rejected: {}", username, role, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewUser;
    use crate::scratch_db;

    fn seeded() -> (tempfile::TempDir, Database) {
        let (dir, db) = scratch_db();
        db.initialize().unwrap();
        db.create_user(&NewUser {
            username: "bob".to_string(),
            password: "pw1".to_string(),
            is_admin: false,
        })
        .unwrap();
        (dir, db)
    }

    fn mutations(s: &str) -> Vec<String> {
        let chars: Vec<char> = s.chars().collect();
        let mut out = Vec::new();
        for i in 0..chars.len() {
            let mut changed = chars.clone();
            changed[i] = if chars[i] == 'x' { 'y' } else { 'x' };
            out.push(changed.into_iter().collect());

            let mut dropped = chars.clone();
            dropped.remove(i);
            out.push(dropped.into_iter().collect());
        }
        out.push(format!("{s}x"));
        out
    }

    #[test]
    fn matching_credentials_are_valid() {
        let (_dir, db) = seeded();
        assert!(db.is_valid_account("bob", "pw1"));
        assert!(db.is_valid_account("admin", "admin"));
    }

    #[test]
    fn single_character_mutations_are_rejected() {
        let (_dir, db) = seeded();
        for name in mutations("bob") {
            assert!(!db.is_valid_account(&name, "pw1"), "username {name:?}");
        }
        for pass in mutations("pw1") {
            assert!(!db.is_valid_account("bob", &pass), "password {pass:?}");
        }
    }

    #[test]
    fn admin_check_requires_flag() {
        let (_dir, db) = seeded();
        assert!(!db.is_admin_account("bob", "pw1"));
        assert!(db.is_admin_account("admin", "admin"));
        assert!(!db.is_admin_account("admin", "wrong"));
    }

    #[test]
    fn unknown_user_is_not_authorized() {
        let (_dir, db) = seeded();
        assert!(matches!(
            db.authorize("nobody", "pw", Role::Account),
            Err(AccessError::NotAuthorized)
        ));
    }

    #[test]
    fn empty_fields_fail_validation_without_lookup() {
        let (_dir, db) = seeded();
        // With the table gone any lookup would surface as a storage error.
        db.with_conn(|conn| Ok(conn.execute_batch("DROP TABLE users")?))
            .unwrap();

        assert!(matches!(
            db.authorize("", "pw1", Role::Account),
            Err(AccessError::Validation("username"))
        ));
        assert!(matches!(
            db.authorize("bob", "", Role::Admin),
            Err(AccessError::Validation("password"))
        ));
        assert!(matches!(
            db.authorize("bob", "pw1", Role::Account),
            Err(AccessError::Storage(_))
        ));

        assert!(!db.is_valid_account("bob", "pw1"));
        assert!(!db.is_admin_account("admin", "admin"));

        assert!(!db.is_valid_account("", "anything"));
        assert!(!db.is_valid_account("anything", ""));
        assert!(!db.is_valid_account("", ""));
    }

    #[test]
    fn authorize_returns_the_matched_record() {
        let (_dir, db) = seeded();
        let user = db.authorize("admin", "admin", Role::Admin).unwrap();
        assert_eq!(user.username, "admin");
        assert!(user.is_admin);
    }
}
