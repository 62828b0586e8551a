use serde::{Deserialize, Serialize};

use crate::models::User;

// -- Auth --

/// Username/password pair identifying whoever issues a command.
/// Missing fields decode as empty strings and are rejected by validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    #[serde(rename = "user")]
    pub username: String,
    pub password: String,
}

// -- v1 payloads --

/// One element of the v1 `[issuer, target]` array used by add and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Input {
    #[serde(rename = "user")]
    pub username: String,
    pub password: String,
    pub admin: i32,
}

impl Input {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

// -- v2 payloads --

/// v2 envelope: the issuer's credentials plus the record the command acts on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct V2Request {
    pub username: String,
    pub password: String,
    #[serde(rename = "load")]
    pub user: User,
}

impl V2Request {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// Returned after an account is added.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
