//! Session endpoints open to any valid account.

use axum::{Json, body::Bytes, extract::State, http::StatusCode, response::IntoResponse};

use roster_types::api::Credentials;

use crate::error::ApiError;
use crate::state::{AppState, parse_body, with_db};
use crate::users::to_wire;

/// POST /v1/login
pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let creds: Credentials = parse_body(&body)?;
    open_session(&state, creds).await
}

/// POST /v1/logout
pub async fn logout(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let creds: Credentials = parse_body(&body)?;
    close_session(&state, creds).await
}

/// GET /v1/logged — users with an open session.
pub async fn logged_users(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let creds: Credentials = parse_body(&body)?;

    let rows = with_db(&state, move |db| {
        db.authorize(&creds.username, &creds.password, roster_db::Role::Account)?;
        Ok(db.list_active_users()?)
    })
    .await?;

    Ok(Json(rows.into_iter().map(to_wire).collect::<Vec<_>>()))
}

pub(crate) async fn open_session(
    state: &AppState,
    creds: Credentials,
) -> Result<StatusCode, ApiError> {
    with_db(state, move |db| Ok(db.login(&creds.username, &creds.password)?)).await?;
    Ok(StatusCode::OK)
}

pub(crate) async fn close_session(
    state: &AppState,
    creds: Credentials,
) -> Result<StatusCode, ApiError> {
    with_db(state, move |db| Ok(db.logout(&creds.username, &creds.password)?)).await?;
    Ok(StatusCode::OK)
}
