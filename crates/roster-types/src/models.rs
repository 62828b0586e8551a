use serde::{Deserialize, Serialize};

/// A full user record as it travels over the wire. Field names and the
/// integer flags match what existing clients send and expect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    #[serde(rename = "user")]
    pub username: String,
    pub password: String,
    #[serde(rename = "lastlogin")]
    pub last_login: i64,
    pub admin: i32,
    pub active: i32,
}
