use crate::utils::common::escape_html;
use std::path::Path;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "mov", "avi", "mkv"];
const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "log", "ini", "conf", "json", "xml", "html", "css", "js", "py", "java", "c", "cpp",
    "h", "md",
];

/// Media classification derived from the lowercased extension alone.
/// Directories are never media.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Text,
    Other,
    Directory,
}

impl MediaKind {
    pub fn for_file(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::Image
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::Video
        } else if TEXT_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::Text
        } else {
            MediaKind::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Image => "Image",
            MediaKind::Video => "Video",
            MediaKind::Text => "Text",
            MediaKind::Other => "File",
            MediaKind::Directory => "Directory",
        }
    }
}

/// One filesystem child, prepared for display. Constructed fresh per
/// listing request and immutable afterwards.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Display name, HTML-escaped here and never re-escaped downstream.
    pub name: String,
    pub is_dir: bool,
    /// Absolute path string used as the identifier for follow-up
    /// operations; the entry itself does not re-validate it.
    pub full_path: String,
    /// Empty for directories, formatted byte count otherwise.
    pub size_label: String,
    pub media_kind: MediaKind,
}

impl FileEntry {
    pub fn new(name: &str, is_dir: bool, full_path: String, size: u64) -> Self {
        let media_kind = if is_dir {
            MediaKind::Directory
        } else {
            MediaKind::for_file(name)
        };
        FileEntry {
            name: escape_html(name).into_owned(),
            is_dir,
            full_path,
            size_label: if is_dir {
                String::new()
            } else {
                format_size(size)
            },
            media_kind,
        }
    }
}

/// Binary-unit size string, one decimal place. Divides by 1024 until the
/// magnitude drops below 1024, falling through to TB for anything larger.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1} TB", size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_size_picks_first_unit_under_1024() {
        assert_eq!(format_size(0), "0.0 B");
        assert_eq!(format_size(1023), "1023.0 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5.0 GB");
        assert_eq!(format_size(1024u64.pow(4)), "1.0 TB");
        // TB is terminal: larger values keep the unit and overflow the magnitude
        assert_eq!(format_size(2048 * 1024u64.pow(4)), "2048.0 TB");
    }

    #[test]
    fn format_size_round_trips_within_rounding() {
        for n in [0u64, 7, 999, 4096, 123_456_789, 9_876_543_210] {
            let label = format_size(n);
            let (value, unit) = label.split_once(' ').unwrap();
            let value: f64 = value.parse().unwrap();
            assert!(value < 1024.0 || unit == "TB");
            let factor = match unit {
                "B" => 1.0,
                "KB" => 1024.0,
                "MB" => 1024.0 * 1024.0,
                "GB" => 1024.0f64.powi(3),
                "TB" => 1024.0f64.powi(4),
                other => panic!("unexpected unit {}", other),
            };
            let back = value * factor;
            // One decimal place of the scaled value bounds the error
            assert!((back - n as f64).abs() <= 0.05 * factor + 1.0);
        }
    }

    #[test]
    fn media_kind_follows_lowercased_extension() {
        assert_eq!(MediaKind::for_file("photo.JPG"), MediaKind::Image);
        assert_eq!(MediaKind::for_file("clip.mkv"), MediaKind::Video);
        assert_eq!(MediaKind::for_file("main.py"), MediaKind::Text);
        assert_eq!(MediaKind::for_file("archive.zip"), MediaKind::Other);
        assert_eq!(MediaKind::for_file("no_extension"), MediaKind::Other);
    }

    #[test]
    fn directories_are_never_media() {
        let entry = FileEntry::new("pictures.png", true, "/d/pictures.png".into(), 0);
        assert_eq!(entry.media_kind, MediaKind::Directory);
        assert_eq!(entry.size_label, "");
    }

    #[test]
    fn name_is_escaped_at_construction() {
        let entry = FileEntry::new("<b>.txt", false, "/d/<b>.txt".into(), 10);
        assert_eq!(entry.name, "&lt;b&gt;.txt");
        // full_path is an identifier, not display text
        assert_eq!(entry.full_path, "/d/<b>.txt");
        assert_eq!(entry.size_label, "10.0 B");
    }
}
