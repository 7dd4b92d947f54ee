use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

/// Failure taxonomy for every filesystem-facing operation. The command
/// execution gateway never produces one of these: its failures fold into
/// the `CommandResult` it returns.
#[derive(Debug)]
pub enum AppError {
    /// The supplied path string could not be made absolute.
    InvalidPath(String),
    /// The operation does not apply to the target (e.g. viewing a directory).
    InvalidRequest(String),
    /// File extension outside the preview allow-lists.
    UnsupportedPreview,
    NotFound(String),
    PermissionDenied(String),
    ListingFailed(String),
    /// Text preview failed to decode as UTF-8 and as GBK.
    UnreadableFile(String),
    UploadFailed(String),
    Internal(String),
}

impl std::error::Error for AppError {}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidPath(msg) => write!(f, "invalid path: {}", msg),
            AppError::InvalidRequest(msg) => write!(f, "invalid request: {}", msg),
            AppError::UnsupportedPreview => write!(f, "unsupported preview format"),
            AppError::NotFound(msg) => write!(f, "not found: {}", msg),
            AppError::PermissionDenied(msg) => write!(f, "permission denied: {}", msg),
            AppError::ListingFailed(msg) => write!(f, "listing failed: {}", msg),
            AppError::UnreadableFile(msg) => write!(f, "unable to read file: {}", msg),
            AppError::UploadFailed(msg) => write!(f, "upload failed: {}", msg),
            AppError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidPath(_) | AppError::InvalidRequest(_) | AppError::UnsupportedPreview => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            AppError::ListingFailed(_)
            | AppError::UnreadableFile(_)
            | AppError::UploadFailed(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Plain-text bodies: this is a diagnostic tool, raw descriptions
        // are the intended output.
        (status, self.to_string()).into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => AppError::NotFound(err.to_string()),
            std::io::ErrorKind::PermissionDenied => AppError::PermissionDenied(err.to_string()),
            _ => AppError::Internal(err.to_string()),
        }
    }
}
