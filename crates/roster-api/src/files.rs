use std::io;
use std::path::Path as FsPath;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Serialize;
use tracing::{error, info};

use crate::error::ApiError;
use crate::state::AppState;

/// 50 MB upload limit for files
pub const MAX_FILE_SIZE: usize = 50 * 1024 * 1024;

#[derive(Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub size: u64,
}

/// PUT /v2/files/{filename} — writes the raw body into the images directory,
/// replacing any file of the same name.
pub async fn upload_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    bytes: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    if !is_plain_filename(&filename) {
        return Err(ApiError::BadRequest(format!("invalid filename '{filename}'")));
    }

    let path = state.images_dir.join(&filename);
    tokio::fs::write(&path, &bytes).await.map_err(|e| {
        error!("Failed to write file {}: {}", path.display(), e);
        ApiError::Internal
    })?;

    info!("Saved {} ({} bytes)", path.display(), bytes.len());
    Ok(Json(UploadResponse {
        filename,
        size: bytes.len() as u64,
    }))
}

/// One path component: no separators, no `.`/`..`.
fn is_plain_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains('\0')
}

/// Creates `dir` if missing and checks that it is a directory.
pub async fn ensure_images_dir(dir: &FsPath) -> io::Result<()> {
    match tokio::fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} is not a directory", dir.display()),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating {}", dir.display());
            tokio::fs::create_dir_all(dir).await
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_traversal_and_separators() {
        assert!(is_plain_filename("avatar.png"));
        assert!(!is_plain_filename(""));
        assert!(!is_plain_filename(".."));
        assert!(!is_plain_filename("a/b.png"));
        assert!(!is_plain_filename("a\\b.png"));
    }

    #[tokio::test]
    async fn ensure_images_dir_creates_and_validates() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("nested/files");
        ensure_images_dir(&dir).await.unwrap();
        assert!(dir.is_dir());
        ensure_images_dir(&dir).await.unwrap();

        let file = tmp.path().join("plain");
        std::fs::write(&file, b"x").unwrap();
        assert!(ensure_images_dir(&file).await.is_err());
    }
}
