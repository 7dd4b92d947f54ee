use super::entry::MediaKind;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::common::mime_for_path;
use crate::utils::path::resolve_path;
use axum::{
    body::Body,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tokio_util::io::ReaderStream;

#[derive(Deserialize)]
pub struct FileParams {
    path: Option<String>,
}

/// Preview payload for a single file. Media is passed through untouched;
/// text is decoded before it leaves the service.
#[derive(Debug)]
pub enum Preview {
    Media {
        bytes: Vec<u8>,
        content_type: &'static str,
    },
    Text(String),
}

/// Classify by extension and load the preview content. Classification
/// trusts the extension completely: the bytes are never sniffed, so a
/// renamed file is served under whatever type its name claims.
pub async fn load_preview(path: &Path) -> Result<Preview, AppError> {
    let metadata = fs::metadata(path)
        .await
        .map_err(|_| AppError::NotFound("file does not exist".to_string()))?;
    if metadata.is_dir() {
        return Err(AppError::InvalidRequest(
            "cannot view a directory".to_string(),
        ));
    }

    let name = path.file_name().unwrap_or_default().to_string_lossy();
    match MediaKind::for_file(&name) {
        MediaKind::Image | MediaKind::Video => {
            let bytes = fs::read(path)
                .await
                .map_err(|e| AppError::UnreadableFile(e.to_string()))?;
            Ok(Preview::Media {
                bytes,
                content_type: mime_for_path(path),
            })
        }
        MediaKind::Text => {
            let bytes = fs::read(path)
                .await
                .map_err(|e| AppError::UnreadableFile(e.to_string()))?;
            decode_text(&bytes).map(Preview::Text)
        }
        _ => Err(AppError::UnsupportedPreview),
    }
}

/// UTF-8 first, GBK as the regional fallback. Bytes valid in neither
/// encoding are an error, not replacement characters.
fn decode_text(bytes: &[u8]) -> Result<String, AppError> {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return Ok(s.to_string());
    }
    let (decoded, _, had_errors) = encoding_rs::GBK.decode(bytes);
    if had_errors {
        return Err(AppError::UnreadableFile(
            "content is neither UTF-8 nor GBK".to_string(),
        ));
    }
    Ok(decoded.into_owned())
}

pub async fn view_file(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FileParams>,
) -> Result<Response, AppError> {
    let raw = match params.path.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => return Err(AppError::NotFound("file does not exist".to_string())),
    };
    let path = resolve_path(&state.config.root_dir, Some(raw))?;

    match load_preview(&path).await? {
        Preview::Media {
            bytes,
            content_type,
        } => Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response()),
        Preview::Text(content) => Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            content,
        )
            .into_response()),
    }
}

/// Extension-agnostic attachment stream: any file downloads, only
/// directories are refused.
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FileParams>,
) -> Result<Response, AppError> {
    let raw = match params.path.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => return Err(AppError::NotFound("file does not exist".to_string())),
    };
    let path = resolve_path(&state.config.root_dir, Some(raw))?;

    let file = match fs::File::open(&path).await {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound("file does not exist".to_string()))
        }
        Err(e) => return Err(e.into()),
    };
    let metadata = file.metadata().await?;
    if metadata.is_dir() {
        return Err(AppError::InvalidRequest(
            "cannot download a directory".to_string(),
        ));
    }

    let filename = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    let headers = [
        (header::CONTENT_TYPE, mime_for_path(&path).to_string()),
        (header::CONTENT_LENGTH, metadata.len().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];

    let body = Body::from_stream(ReaderStream::new(file));
    Ok((headers, body).into_response())
}
