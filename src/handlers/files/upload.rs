use crate::error::AppError;
use crate::state::AppState;
use crate::utils::common::sanitize_filename;
use crate::utils::path::resolve_path;
use axum::{
    extract::{Multipart, State},
    response::Redirect,
};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Write a byte stream to `dest`, overwriting any existing file. Returns
/// the number of bytes written. No size limit is applied.
pub async fn write_stream<S, B, E>(dest: &Path, mut stream: S) -> Result<u64, AppError>
where
    S: futures::Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    let mut file = fs::File::create(dest)
        .await
        .map_err(|e| AppError::UploadFailed(e.to_string()))?;
    let mut size = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| AppError::UploadFailed(e.to_string()))?;
        let chunk = chunk.as_ref();
        size += chunk.len() as u64;
        file.write_all(chunk)
            .await
            .map_err(|e| AppError::UploadFailed(e.to_string()))?;
    }
    file.flush()
        .await
        .map_err(|e| AppError::UploadFailed(e.to_string()))?;
    Ok(size)
}

/// Store an uploaded file under the directory named by `current_path`,
/// creating it if missing. A request without a usable file is a no-op
/// that still redirects back to the listing.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let mut current_path: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::UploadFailed(e.to_string()))?
    {
        match field.name() {
            Some("current_path") => {
                current_path = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::UploadFailed(e.to_string()))?,
                );
            }
            Some("file") => {
                let filename = field.file_name().unwrap_or("").to_string();
                let Some(safe_name) = sanitize_filename(&filename) else {
                    // No filename (or nothing usable after sanitization):
                    // skip, the redirect below still happens
                    continue;
                };

                let dest_dir = destination_dir(&state, current_path.as_deref())?;
                fs::create_dir_all(&dest_dir)
                    .await
                    .map_err(|e| AppError::UploadFailed(e.to_string()))?;
                write_stream(&dest_dir.join(&safe_name), field).await?;
            }
            _ => {}
        }
    }

    let back = current_path
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| state.config.upload_dir().to_string_lossy().to_string());
    Ok(Redirect::to(&format!(
        "/list?path={}",
        urlencoding::encode(&back)
    )))
}

fn destination_dir(state: &AppState, current_path: Option<&str>) -> Result<PathBuf, AppError> {
    match current_path {
        Some(p) if !p.is_empty() => resolve_path(&state.config.root_dir, Some(p)),
        _ => Ok(state.config.upload_dir()),
    }
}
