use super::entry::FileEntry;
use crate::error::AppError;
use crate::render;
use crate::state::AppState;
use crate::utils::disks::list_roots;
use crate::utils::path::resolve_path;
use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;

#[derive(Deserialize)]
pub struct ListParams {
    path: Option<String>,
}

/// Enumerate the immediate children of `path`. Entries whose metadata
/// cannot be read are dropped, but an error from the enumeration itself
/// fails the listing rather than passing off a truncated one as complete.
/// Order is whatever the OS yields.
pub async fn read_entries(path: &Path) -> Result<Vec<FileEntry>, AppError> {
    let mut dir = fs::read_dir(path).await.map_err(|e| match e.kind() {
        ErrorKind::PermissionDenied => AppError::PermissionDenied(e.to_string()),
        _ => AppError::ListingFailed(e.to_string()),
    })?;

    let mut entries = Vec::new();
    loop {
        let entry = match dir.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => return Err(AppError::ListingFailed(e.to_string())),
        };
        let metadata = match entry.metadata().await {
            Ok(m) => m,
            Err(_) => continue,
        };
        let name = entry.file_name().to_string_lossy().to_string();
        let full_path = entry.path().to_string_lossy().to_string();
        entries.push(FileEntry::new(
            &name,
            metadata.is_dir(),
            full_path,
            metadata.len(),
        ));
    }
    Ok(entries)
}

pub async fn list_files(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, AppError> {
    let path = resolve_path(&state.config.root_dir, params.path.as_deref())?;
    let entries = read_entries(&path).await?;
    let roots = list_roots();
    Ok(render::file_manager_page(&path, &entries, &roots))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::files::entry::MediaKind;

    #[tokio::test]
    async fn lists_files_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("report.txt"), b"hello world").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let mut entries = read_entries(dir.path()).await.unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].name, "report.txt");
        assert!(!entries[0].is_dir);
        assert_eq!(entries[0].size_label, "11.0 B");
        assert_eq!(entries[0].media_kind, MediaKind::Text);

        assert_eq!(entries[1].name, "sub");
        assert!(entries[1].is_dir);
        assert_eq!(entries[1].size_label, "");
    }

    #[tokio::test]
    async fn missing_directory_is_a_generic_listing_failure() {
        let err = read_entries(Path::new("/definitely/not/here")).await.unwrap_err();
        assert!(matches!(err, AppError::ListingFailed(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unreadable_directory_is_permission_denied() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        std::fs::create_dir(&locked).unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Running as root bypasses permission bits, skip there
        if nix::unistd::Uid::effective().is_root() {
            return;
        }

        let err = read_entries(&locked).await.unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied(_)));

        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn entries_that_fail_to_stat_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ok.txt"), b"fine").unwrap();
        // Dangling symlink: read_dir yields it but metadata() fails
        std::os::unix::fs::symlink("/definitely/not/here", dir.path().join("broken")).unwrap();

        let entries = read_entries(dir.path()).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "ok.txt");
    }
}
