use rand::Rng;
use std::borrow::Cow;
use std::path::Path;

/// Password alphabet for generated credentials (lowercase alphanumeric).
const PASSWORD_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

const GENERATED_PASSWORD_LENGTH: usize = 12;

/// Generate a random password, used when no `ADMIN_PASS` is configured.
pub fn generate_password() -> String {
    let mut rng = rand::rng();
    let mut out = String::with_capacity(GENERATED_PASSWORD_LENGTH);
    for _ in 0..GENERATED_PASSWORD_LENGTH {
        let idx = rng.random_range(0..PASSWORD_ALPHABET.len());
        out.push(PASSWORD_ALPHABET[idx] as char);
    }
    out
}

/// Escape a string for embedding in HTML text or attribute positions.
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut escaped = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Collapse an incoming upload filename to a safe basename: take the last
/// path segment across both separator styles, map anything outside
/// `[A-Za-z0-9._-]` to `_`, and strip leading dots. Returns `None` when
/// nothing usable remains (treated upstream as "no file attached").
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '_') {
        return None;
    }
    Some(cleaned.to_string())
}

/// Content type from the file extension alone, covering the preview
/// allow-lists plus a generic fallback for downloads.
pub fn mime_for_path(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "bmp" => "image/bmp",
            "webp" => "image/webp",
            "mp4" => "video/mp4",
            "webm" => "video/webm",
            "ogg" => "video/ogg",
            "mov" => "video/quicktime",
            "avi" => "video/x-msvideo",
            "mkv" => "video/x-matroska",
            "txt" | "log" | "ini" | "conf" | "md" => "text/plain",
            "html" | "htm" => "text/html",
            "css" => "text/css",
            "js" => "application/javascript",
            "json" => "application/json",
            "xml" => "text/xml",
            "pdf" => "application/pdf",
            "zip" => "application/zip",
            _ => "application/octet-stream",
        },
        None => "application/octet-stream",
    }
}
