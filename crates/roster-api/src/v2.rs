//! v2 routes: one JSON envelope carrying the issuer's credentials and, where
//! relevant, the record to act on.

use axum::{Json, body::Bytes, extract::State, response::IntoResponse};

use roster_db::NewUser;
use roster_types::api::V2Request;

use crate::auth::{close_session, open_session};
use crate::error::ApiError;
use crate::state::{AppState, parse_body};
use crate::users::{add_user, list_all};

/// POST /v2/add — creates `load`. Its id, lastlogin and active fields are
/// ignored; the store assigns those.
pub async fn add(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let req: V2Request = parse_body(&body)?;
    let issuer = req.credentials();
    let load = req.user;

    let created = add_user(
        &state,
        issuer,
        NewUser {
            username: load.username,
            password: load.password,
            is_admin: load.admin != 0,
        },
    )
    .await?;

    Ok(Json(created))
}

/// POST /v2/login
pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let req: V2Request = parse_body(&body)?;
    open_session(&state, req.credentials()).await
}

/// POST /v2/logout
pub async fn logout(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let req: V2Request = parse_body(&body)?;
    close_session(&state, req.credentials()).await
}

/// GET /v2/getall — admin only; a failed check answers 400.
pub async fn get_all(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let req: V2Request = parse_body(&body)?;
    let users = list_all(&state, req.credentials()).await?;
    Ok(Json(users))
}
