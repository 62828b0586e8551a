//! Account management endpoints.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use roster_db::{NewUser, Role, UserRow};
use roster_types::api::{CreatedResponse, Credentials, Input};
use roster_types::models::User;

use crate::error::ApiError;
use crate::state::{AppState, parse_body, with_db};

pub(crate) fn to_wire(row: UserRow) -> User {
    User {
        id: row.id,
        username: row.username,
        password: row.password,
        last_login: row.last_login,
        admin: row.is_admin as i32,
        active: row.is_active as i32,
    }
}

/// Splits the v1 `[issuer, target]` body.
fn issuer_and_target(body: &Bytes) -> Result<(Input, Input), ApiError> {
    let pair: Vec<Input> = parse_body(body)?;
    let mut pair = pair.into_iter();
    match (pair.next(), pair.next(), pair.next()) {
        (Some(issuer), Some(target), None) => Ok((issuer, target)),
        _ => Err(ApiError::BadRequest(
            "expected [issuer, target] array".to_string(),
        )),
    }
}

/// An account with an empty username or password could never pass the gate
/// again, so add and update refuse to write one.
fn validate_account_fields(username: &str, password: &str) -> Result<(), ApiError> {
    if username.is_empty() {
        return Err(ApiError::Validation("username"));
    }
    if password.is_empty() {
        return Err(ApiError::Validation("password"));
    }
    Ok(())
}

/// Admin-only insert shared by the v1 and v2 add routes.
pub(crate) async fn add_user(
    state: &AppState,
    issuer: Credentials,
    user: NewUser,
) -> Result<CreatedResponse, ApiError> {
    validate_account_fields(&user.username, &user.password)?;

    let id = with_db(state, move |db| {
        db.authorize(&issuer.username, &issuer.password, Role::Admin)?;
        Ok(db.create_user(&user)?)
    })
    .await?;

    Ok(CreatedResponse { id })
}

/// Admin-only listing of every account. Callers decide how a failed admin
/// check is reported.
pub(crate) async fn list_all(
    state: &AppState,
    issuer: Credentials,
) -> Result<Vec<User>, ApiError> {
    let rows = with_db(state, move |db| {
        db.authorize(&issuer.username, &issuer.password, Role::Admin)?;
        Ok(db.list_users()?)
    })
    .await?;

    Ok(rows.into_iter().map(to_wire).collect())
}

/// POST /v1/add — body `[issuer, target]`.
pub async fn add(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let (issuer, target) = issuer_and_target(&body)?;

    let created = add_user(
        &state,
        issuer.credentials(),
        NewUser {
            username: target.username,
            password: target.password,
            is_admin: target.admin != 0,
        },
    )
    .await?;

    Ok(Json(created))
}

/// DELETE /v1/user/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let creds: Credentials = parse_body(&body)?;

    with_db(&state, move |db| {
        db.authorize(&creds.username, &creds.password, Role::Admin)?;

        let target = db
            .get_user_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("user {id}")))?;
        info!("Deleting user {:?}", target);
        db.delete_user(id)?;
        Ok(())
    })
    .await?;

    Ok(StatusCode::OK)
}

/// GET /v1/getall — admin only; a failed check answers 403.
pub async fn get_all(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let creds: Credentials = parse_body(&body)?;

    match list_all(&state, creds).await {
        Ok(users) => Ok(Json(users)),
        Err(ApiError::Storage(e)) => Err(ApiError::Storage(e)),
        Err(ApiError::Internal) => Err(ApiError::Internal),
        Err(_) => Err(ApiError::Forbidden),
    }
}

/// GET /v1/getid — the caller's own id.
pub async fn get_id(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let creds: Credentials = parse_body(&body)?;

    let user = with_db(&state, move |db| {
        Ok(db.authorize(&creds.username, &creds.password, Role::Account)?)
    })
    .await?;

    Ok(format!("User {} has ID: {}\n", user.username, user.id))
}

/// GET /v1/username/{id} — full record. No credentials are asked for.
pub async fn get_user_data(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let user = with_db(&state, move |db| Ok(db.get_user_by_id(id)?))
        .await?
        .ok_or_else(|| ApiError::BadRequest(format!("user {id} not found")))?;

    Ok(Json(to_wire(user)))
}

/// PUT /v1/update — body `[issuer, target]`. The target is located by
/// username; its username, password and admin flag are overwritten.
pub async fn update(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let (issuer, target) = issuer_and_target(&body)?;
    validate_account_fields(&target.username, &target.password)?;

    with_db(&state, move |db| {
        db.authorize(&issuer.username, &issuer.password, Role::Admin)?;

        let mut user = db
            .get_user_by_username(&target.username)?
            .ok_or_else(|| ApiError::NotFound(format!("user '{}'", target.username)))?;
        user.username = target.username;
        user.password = target.password;
        user.is_admin = target.admin != 0;
        db.update_user(&user)?;
        Ok(())
    })
    .await?;

    Ok(StatusCode::OK)
}

