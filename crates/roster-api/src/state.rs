use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Bytes;
use serde::de::DeserializeOwned;
use tracing::error;

use roster_db::Database;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    /// Where `/v2/files/{filename}` uploads land.
    pub images_dir: PathBuf,
}

/// Runs a store call on the blocking pool. SQLite calls block, so they never
/// run on the async worker threads.
pub(crate) async fn with_db<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.db))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal
        })?
}

/// Decodes a JSON request body. Content-Type is not checked; older clients
/// do not always send one.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("No input!".to_string()));
    }
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(e.to_string()))
}
