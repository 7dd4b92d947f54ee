use crate::error::AppError;
use std::path::{Component, Path, PathBuf};

/// Lexical normalization: collapses `.` and `..` segments without touching
/// the filesystem, so paths that do not exist yet still resolve.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut ret = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(..) => ret.push(component.as_os_str()),
            Component::RootDir => ret.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                ret.pop();
            }
            Component::Normal(c) => ret.push(c),
        }
    }
    ret
}

/// Turns a request-supplied path string into the absolute path every
/// filesystem operation uses. An absent or empty string means the
/// configured root directory.
///
/// Normalization only, no containment: `..` sequences resolve to wherever
/// the OS would take them, including outside the root. Any path the host
/// can reach is accepted.
pub fn resolve_path(root: &Path, raw: Option<&str>) -> Result<PathBuf, AppError> {
    let raw = match raw {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(root.to_path_buf()),
    };

    let p = Path::new(raw);
    if p.is_absolute() {
        return Ok(normalize_path(p));
    }

    // Relative paths resolve against the process working directory, the
    // same base the OS itself would use.
    let cwd = std::env::current_dir().map_err(|e| AppError::InvalidPath(e.to_string()))?;
    Ok(normalize_path(&cwd.join(p)))
}
