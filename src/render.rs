//! Thin presentation layer: turns listing and execution results into the
//! two HTML pages. All dynamic text is escaped here (entry names arrive
//! pre-escaped from `FileEntry` and are not escaped again).

use crate::handlers::exec::CommandResult;
use crate::handlers::files::entry::{FileEntry, MediaKind};
use crate::utils::common::escape_html;
use axum::response::Html;
use std::fmt::Write;
use std::path::Path;
use urlencoding::encode;

const FILE_MANAGER_STYLE: &str = r#"
        body { font-family: Arial, sans-serif; margin: 20px; }
        .header { background-color: #4a6fa5; color: white; padding: 15px; border-radius: 5px; }
        .disk-list { display: flex; gap: 10px; margin: 15px 0; }
        .disk-btn { padding: 5px 10px; background: #e9ecef; border-radius: 3px; text-decoration: none; }
        .disk-btn:hover { background: #d1d7dc; }
        .active-disk { background: #4a6fa5; color: white; }
        table { width: 100%; border-collapse: collapse; margin: 15px 0; }
        th, td { padding: 10px; text-align: left; border-bottom: 1px solid #ddd; }
        th { background-color: #4a6fa5; color: white; }
        .btn { padding: 5px 10px; border: none; border-radius: 3px; text-decoration: none; display: inline-block; margin: 2px; }
        .btn-download { background: #4CAF50; color: white; }
        .btn-view { background: #2196F3; color: white; }
        .btn-upload { background: #2196F3; color: white; }
        .nav-links { margin-top: 20px; }
        .preview-container { margin-top: 20px; }
        .preview-img, .preview-video { max-width: 100%; max-height: 500px; }
        .preview-text { max-width: 100%; height: 500px; overflow: auto; border: 1px solid #ddd; padding: 10px; white-space: pre-wrap; }
"#;

const PREVIEW_SCRIPT: &str = r#"
        function showMedia(id, url) {
            document.getElementById('preview-img').style.display = 'none';
            document.getElementById('preview-video').style.display = 'none';
            document.getElementById('preview-text').style.display = 'none';
            var el = document.getElementById(id);
            el.src = url;
            el.style.display = 'block';
            document.getElementById('preview-container').style.display = 'block';
        }
        function fetchTextFile(url) {
            fetch(url)
                .then(function (response) { return response.text(); })
                .then(function (text) {
                    document.getElementById('preview-img').style.display = 'none';
                    document.getElementById('preview-video').style.display = 'none';
                    var pre = document.getElementById('preview-text');
                    pre.textContent = text;
                    pre.style.display = 'block';
                    document.getElementById('preview-container').style.display = 'block';
                })
                .catch(function (error) { alert('failed to load text file: ' + error); });
        }
"#;

pub fn file_manager_page(path: &Path, entries: &[FileEntry], roots: &[String]) -> Html<String> {
    let path_display = path.to_string_lossy();
    let mut page = String::with_capacity(8192);

    let _ = write!(
        page,
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Mamba File Manager</title>
    <meta http-equiv="Content-Security-Policy" content="default-src 'self'; script-src 'self' 'unsafe-inline'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; media-src 'self'">
    <style>{style}</style>
</head>
<body>
    <div class="header">
        <h1>Mamba File Manager</h1>
        <p>Current path: {path}</p>
    </div>
    <div class="disk-list">
"#,
        style = FILE_MANAGER_STYLE,
        path = escape_html(&path_display),
    );

    for root in roots {
        let active = if path_display.starts_with(root.as_str()) {
            " active-disk"
        } else {
            ""
        };
        // The link keeps the full root path (`C:\`, not the
        // drive-relative `C:`); only the label drops the separator
        let label = root.trim_end_matches('\\');
        let label = if label.is_empty() { root.as_str() } else { label };
        let _ = write!(
            page,
            r#"        <a href="/list?path={href}" class="disk-btn{active}">{label}</a>
"#,
            href = encode(root),
            active = active,
            label = escape_html(label),
        );
    }

    page.push_str(
        r#"    </div>
    <table>
        <tr><th>Name</th><th>Type</th><th>Size</th><th>Actions</th></tr>
"#,
    );

    for entry in entries {
        page.push_str("        <tr><td>");
        let href = encode(&entry.full_path);
        match entry.media_kind {
            MediaKind::Directory => {
                let _ = write!(page, r#"<a href="/list?path={}">{}/</a>"#, href, entry.name);
            }
            MediaKind::Image => {
                let _ = write!(
                    page,
                    r##"<a href="#" onclick="showMedia('preview-img', '/view?path={}')">{}</a>"##,
                    href, entry.name
                );
            }
            MediaKind::Video => {
                let _ = write!(
                    page,
                    r##"<a href="#" onclick="showMedia('preview-video', '/view?path={}')">{}</a>"##,
                    href, entry.name
                );
            }
            MediaKind::Text => {
                let _ = write!(
                    page,
                    r##"<a href="#" onclick="fetchTextFile('/view?path={}')">{}</a>"##,
                    href, entry.name
                );
            }
            MediaKind::Other => page.push_str(&entry.name),
        }
        let _ = write!(
            page,
            "</td><td>{}</td><td>{}</td><td>",
            entry.media_kind.label(),
            entry.size_label
        );
        if !entry.is_dir {
            let _ = write!(
                page,
                r#"<a href="/download?path={}" class="btn btn-download">Download</a>"#,
                href
            );
            if !matches!(entry.media_kind, MediaKind::Other) {
                let _ = write!(
                    page,
                    r#" <a href="/view?path={}" target="_blank" class="btn btn-view">View</a>"#,
                    href
                );
            }
        }
        page.push_str("</td></tr>\n");
    }

    let _ = write!(
        page,
        r#"    </table>
    <div id="preview-container" class="preview-container" style="display:none;">
        <h3>Preview</h3>
        <img id="preview-img" class="preview-img" style="display:none;">
        <video id="preview-video" class="preview-video" controls style="display:none;"></video>
        <pre id="preview-text" class="preview-text" style="display:none;"></pre>
        <button onclick="document.getElementById('preview-container').style.display='none'" class="btn btn-view">Close preview</button>
    </div>
    <h3>Upload file</h3>
    <form action="/upload" method="post" enctype="multipart/form-data">
        <input type="hidden" name="current_path" value="{path}">
        <input type="file" name="file">
        <button type="submit" class="btn btn-upload">Upload</button>
    </form>
    <div class="nav-links">
        <a href="/exec" class="btn btn-view">Go to command executor</a>
    </div>
    <script>{script}</script>
</body>
</html>
"#,
        path = escape_html(&path_display),
        script = PREVIEW_SCRIPT,
    );

    Html(page)
}

const COMMAND_STYLE: &str = r#"
        body { font-family: Arial, sans-serif; margin: 20px; }
        .header { background-color: #6c757d; color: white; padding: 15px; border-radius: 5px; }
        .command-form { margin: 20px 0; }
        .command-output { background: #f8f9fa; padding: 15px; border-radius: 5px; }
        pre { white-space: pre-wrap; }
        .btn { padding: 5px 10px; background: #6c757d; color: white; border: none; border-radius: 3px; text-decoration: none; }
"#;

pub fn command_page(result: Option<&CommandResult>) -> Html<String> {
    let mut page = String::with_capacity(2048);

    let _ = write!(
        page,
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Mamba Command Executor</title>
    <meta http-equiv="Content-Security-Policy" content="default-src 'self'; script-src 'self' 'unsafe-inline'; style-src 'self' 'unsafe-inline'">
    <style>{style}</style>
</head>
<body>
    <div class="header">
        <h1>Mamba Command Executor</h1>
    </div>
    <div class="nav-links">
        <a href="/list" class="btn">Back to file manager</a>
    </div>
    <form action="/exec" method="post" class="command-form">
        <input type="text" name="command" placeholder="Enter command" style="width: 70%; padding: 8px;">
        <button type="submit" class="btn">Execute</button>
    </form>
"#,
        style = COMMAND_STYLE,
    );

    if let Some(result) = result {
        let _ = write!(
            page,
            r#"    <div class="command-output">
        <h3>Result</h3>
        <p><strong>Command:</strong> {command}</p>
        <p><strong>Exit code:</strong> {code}</p>
"#,
            command = escape_html(&result.command),
            code = result.exit_code,
        );
        if !result.stdout.is_empty() {
            let _ = write!(
                page,
                "        <p><strong>Output:</strong></p>\n        <pre>{}</pre>\n",
                escape_html(&result.stdout)
            );
        }
        if !result.stderr.is_empty() {
            let _ = write!(
                page,
                "        <p><strong>Errors:</strong></p>\n        <pre>{}</pre>\n",
                escape_html(&result.stderr)
            );
        }
        page.push_str("    </div>\n");
    }

    page.push_str("</body>\n</html>\n");
    Html(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_page_escapes_path_and_links_entries() {
        let entries = vec![
            FileEntry::new("notes.txt", false, "/data/notes.txt".into(), 42),
            FileEntry::new("sub", true, "/data/sub".into(), 0),
        ];
        let Html(page) = file_manager_page(
            Path::new("/data/<x>"),
            &entries,
            &["/".to_string()],
        );

        assert!(page.contains("&lt;x&gt;"));
        assert!(!page.contains("<x>"));
        assert!(page.contains("/download?path=%2Fdata%2Fnotes.txt"));
        assert!(page.contains("/list?path=%2Fdata%2Fsub"));
        assert!(page.contains("42.0 B"));
    }

    #[test]
    fn drive_links_target_the_drive_root_not_the_bare_letter() {
        let Html(page) = file_manager_page(
            Path::new("C:\\data"),
            &[],
            &["C:\\".to_string(), "D:\\".to_string()],
        );

        // Hrefs carry the trailing backslash so resolution hits C:\,
        // never the drive-relative "C:" current directory
        assert!(page.contains("/list?path=C%3A%5C"));
        assert!(page.contains("/list?path=D%3A%5C"));
        assert!(!page.contains("path=C%3A\""));
        // Labels stay letter-only, and the current drive is highlighted
        assert!(page.contains(r#"class="disk-btn active-disk">C:</a>"#));
        assert!(page.contains(r#"class="disk-btn">D:</a>"#));
    }

    #[test]
    fn command_page_escapes_result_fields() {
        let result = CommandResult {
            command: "echo '<hi>'".to_string(),
            stdout: "<hi>\n".to_string(),
            stderr: String::new(),
            exit_code: 0,
        };
        let Html(page) = command_page(Some(&result));
        assert!(page.contains("echo &#x27;&lt;hi&gt;&#x27;"));
        assert!(page.contains("<pre>&lt;hi&gt;\n</pre>"));
        assert!(!page.contains("<hi>"));
        assert!(page.contains("Exit code:</strong> 0"));
    }

    #[test]
    fn idle_command_page_has_no_output_block() {
        let Html(page) = command_page(None);
        assert!(page.contains("Enter command"));
        assert!(!page.contains("command-output"));
    }
}
