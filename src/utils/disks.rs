/// Top-level roots offered in the navigation bar. On Windows every
/// existing drive letter is probed; elsewhere the filesystem has a single
/// root. Cheap enough to call per request, so nothing is cached.
///
/// Windows entries keep the trailing backslash (`C:\`): a bare `C:` is a
/// drive-relative path, and resolving it would land in that drive's
/// current directory instead of its root.
#[cfg(windows)]
pub fn list_roots() -> Vec<String> {
    (b'A'..=b'Z')
        .map(|d| format!("{}:\\", d as char))
        .filter(|root| std::path::Path::new(root).exists())
        .collect()
}

#[cfg(not(windows))]
pub fn list_roots() -> Vec<String> {
    vec!["/".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(windows))]
    #[test]
    fn single_root_off_windows() {
        assert_eq!(list_roots(), vec!["/".to_string()]);
    }

    #[cfg(windows)]
    #[test]
    fn roots_are_absolute_drive_paths_in_order() {
        let roots = list_roots();
        assert!(!roots.is_empty());
        let mut sorted = roots.clone();
        sorted.sort();
        assert_eq!(roots, sorted);
        for root in &roots {
            assert_eq!(root.len(), 3);
            assert!(root.ends_with(":\\"));
            assert!(std::path::Path::new(root).is_absolute());
        }
    }
}
