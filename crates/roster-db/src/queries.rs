use crate::models::{NewUser, UserRow};
use crate::{Database, Result, StoreError, migrations};
use rusqlite::{Connection, Row};
use tracing::{debug, info};

const BOOTSTRAP_ADMIN: &str = "admin";

impl Database {
    // -- Provisioning --

    /// Wipes the directory and seeds the bootstrap admin (`admin`/`admin`).
    /// Destructive; only meant for first-run provisioning.
    pub fn initialize(&self) -> Result<UserRow> {
        self.with_conn(|conn| {
            let tx = conn.unchecked_transaction()?;
            migrations::reset(&tx)?;

            let admin = NewUser {
                username: BOOTSTRAP_ADMIN.to_string(),
                password: BOOTSTRAP_ADMIN.to_string(),
                is_admin: true,
            };
            let now = chrono::Utc::now().timestamp();
            let id = insert_user(&tx, &admin, now)?;
            tx.commit()?;

            info!("Users table recreated with bootstrap admin (id {})", id);
            Ok(UserRow {
                id,
                username: admin.username,
                password: admin.password,
                last_login: now,
                is_admin: true,
                is_active: false,
            })
        })
    }

    // -- Users --

    /// Returns the id the store assigned.
    pub fn create_user(&self, user: &NewUser) -> Result<i64> {
        let now = chrono::Utc::now().timestamp();
        let id = self.with_conn(|conn| insert_user(conn, user, now))?;
        info!("Added user {} with id {}", user.username, id);
        Ok(id)
    }

    /// Overwrites every column of the row with `user.id`. Returns the number of
    /// rows changed; zero means no such id and is not treated as an error.
    pub fn update_user(&self, user: &UserRow) -> Result<usize> {
        let affected = self.with_conn(|conn| {
            Ok(conn.execute(
                "UPDATE users SET username = ?1, password = ?2, last_login = ?3, admin = ?4, active = ?5
                 WHERE id = ?6",
                rusqlite::params![
                    user.username,
                    user.password,
                    user.last_login,
                    user.is_admin,
                    user.is_active,
                    user.id
                ],
            )?)
        })?;
        debug!("Update of user {}: {} row(s) affected", user.id, affected);
        Ok(affected)
    }

    /// Deleting an id that does not exist succeeds with zero rows affected.
    pub fn delete_user(&self, id: i64) -> Result<usize> {
        let affected =
            self.with_conn(|conn| Ok(conn.execute("DELETE FROM users WHERE id = ?1", [id])?))?;
        debug!("Delete of user {}: {} row(s) affected", id, affected);
        Ok(affected)
    }

    pub fn get_user_by_id(&self, id: i64) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_id(conn, id))
    }

    /// Usernames are not unique. When several rows share one, the lowest id wins.
    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    pub fn list_users(&self) -> Result<Vec<UserRow>> {
        self.with_conn(|conn| query_users(conn, false))
    }

    /// Users with an open session.
    pub fn list_active_users(&self) -> Result<Vec<UserRow>> {
        self.with_conn(|conn| query_users(conn, true))
    }

    pub fn count_users(&self) -> Result<i64> {
        self.with_conn(|conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?)
        })
    }
}

fn insert_user(conn: &Connection, user: &NewUser, now: i64) -> Result<i64> {
    conn.execute(
        "INSERT INTO users (username, password, last_login, admin, active) VALUES (?1, ?2, ?3, ?4, 0)",
        rusqlite::params![user.username, user.password, now, user.is_admin],
    )?;
    Ok(conn.last_insert_rowid())
}

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
        last_login: row.get(3)?,
        is_admin: row.get(4)?,
        is_active: row.get(5)?,
    })
}

fn query_user_by_id(conn: &Connection, id: i64) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, password, last_login, admin, active FROM users WHERE id = ?1",
    )?;

    stmt.query_row([id], row_to_user).optional()
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, password, last_login, admin, active FROM users
         WHERE username = ?1
         ORDER BY id
         LIMIT 1",
    )?;

    stmt.query_row([username], row_to_user).optional()
}

fn query_users(conn: &Connection, active_only: bool) -> Result<Vec<UserRow>> {
    let sql = if active_only {
        "SELECT id, username, password, last_login, admin, active FROM users WHERE active = 1 ORDER BY id"
    } else {
        "SELECT id, username, password, last_login, admin, active FROM users ORDER BY id"
    };

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], row_to_user)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::from(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scratch_db;

    fn new_user(username: &str, password: &str, is_admin: bool) -> NewUser {
        NewUser {
            username: username.to_string(),
            password: password.to_string(),
            is_admin,
        }
    }

    #[test]
    fn initialize_leaves_only_bootstrap_admin() {
        let (_dir, db) = scratch_db();
        db.create_user(&new_user("alice", "pw", false)).unwrap();
        db.create_user(&new_user("bob", "pw", true)).unwrap();

        let admin = db.initialize().unwrap();

        let users = db.list_users().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0], admin);
        assert_eq!(users[0].username, "admin");
        assert_eq!(users[0].password, "admin");
        assert!(users[0].is_admin);
        assert!(!users[0].is_active);
    }

    #[test]
    fn create_assigns_distinct_ids_and_starts_logged_out() {
        let (_dir, db) = scratch_db();
        db.initialize().unwrap();

        let before = chrono::Utc::now().timestamp();
        let ids: Vec<i64> = (0..5)
            .map(|i| db.create_user(&new_user(&format!("user{i}"), "pw", false)).unwrap())
            .collect();

        let users = db.list_users().unwrap();
        assert_eq!(users.len(), 6);

        let mut all_ids: Vec<i64> = users.iter().map(|u| u.id).collect();
        all_ids.dedup();
        assert_eq!(all_ids.len(), 6);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));

        for user in users.iter().filter(|u| u.username != "admin") {
            assert!(!user.is_active);
            assert!(user.last_login >= before);
        }
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let (_dir, db) = scratch_db();
        let first = db.create_user(&new_user("carol", "pw", false)).unwrap();
        db.delete_user(first).unwrap();
        let second = db.create_user(&new_user("dave", "pw", false)).unwrap();
        assert!(second > first);
    }

    #[test]
    fn update_overwrites_fields_but_keeps_id() {
        let (_dir, db) = scratch_db();
        let id = db.create_user(&new_user("erin", "old", false)).unwrap();

        let mut user = db.get_user_by_id(id).unwrap().unwrap();
        user.username = "erin2".to_string();
        user.password = "new".to_string();
        user.is_admin = true;
        user.is_active = true;
        user.last_login = 42;
        assert_eq!(db.update_user(&user).unwrap(), 1);

        let stored = db.get_user_by_id(id).unwrap().unwrap();
        assert_eq!(stored, user);
        assert!(db.get_user_by_username("erin").unwrap().is_none());
    }

    #[test]
    fn update_of_missing_id_is_not_an_error() {
        let (_dir, db) = scratch_db();
        let ghost = UserRow {
            id: 999,
            username: "ghost".to_string(),
            ..Default::default()
        };
        assert_eq!(db.update_user(&ghost).unwrap(), 0);
        assert_eq!(db.count_users().unwrap(), 0);
    }

    #[test]
    fn delete_missing_id_leaves_count_unchanged() {
        let (_dir, db) = scratch_db();
        db.initialize().unwrap();
        db.create_user(&new_user("frank", "pw", false)).unwrap();

        assert_eq!(db.delete_user(12345).unwrap(), 0);
        assert_eq!(db.count_users().unwrap(), 2);
    }

    #[test]
    fn lookups_for_missing_keys_return_none() {
        let (_dir, db) = scratch_db();
        db.initialize().unwrap();

        assert!(db.get_user_by_id(77).unwrap().is_none());
        assert!(db.get_user_by_username("nobody").unwrap().is_none());
    }

    #[test]
    fn duplicate_usernames_resolve_to_lowest_id() {
        let (_dir, db) = scratch_db();
        let first = db.create_user(&new_user("twin", "one", false)).unwrap();
        db.create_user(&new_user("twin", "two", true)).unwrap();

        let found = db.get_user_by_username("twin").unwrap().unwrap();
        assert_eq!(found.id, first);
        assert_eq!(found.password, "one");
    }

    #[test]
    fn list_active_filters_on_session_flag() {
        let (_dir, db) = scratch_db();
        let a = db.create_user(&new_user("gina", "pw", false)).unwrap();
        db.create_user(&new_user("hank", "pw", false)).unwrap();

        let mut gina = db.get_user_by_id(a).unwrap().unwrap();
        gina.is_active = true;
        db.update_user(&gina).unwrap();

        let active = db.list_active_users().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].username, "gina");
    }

    #[test]
    fn reopening_keeps_existing_rows() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("users.db");
        {
            let db = Database::open(&path).unwrap();
            db.initialize().unwrap();
            db.create_user(&new_user("ivan", "pw", false)).unwrap();
        }
        let db = Database::open(&path).unwrap();
        assert_eq!(db.count_users().unwrap(), 2);
    }

    #[test]
    fn missing_table_is_a_store_error_not_a_miss() {
        let (_dir, db) = scratch_db();
        db.with_conn(|conn| Ok(conn.execute_batch("DROP TABLE users")?))
            .unwrap();

        assert!(matches!(
            db.get_user_by_username("admin"),
            Err(StoreError::Sqlite(_))
        ));
        assert!(db.list_users().is_err());
    }
}
