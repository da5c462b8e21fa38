//! Output scrubbing applied before anything a program printed reaches the
//! browser.

use regex::Regex;
use std::sync::LazyLock;

/// Replaces the per-run workspace directory
pub const TEMPDIR_PLACEHOLDER: &str = "<tempdir>";

/// Replaces any other absolute path
pub const FILEPATH_PLACEHOLDER: &str = "<filepath>";

static WINDOWS_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z]:[/\\][^:\n]*").expect("windows path pattern is valid")
});

static UNIX_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(/[^:\n\s]*)+").expect("unix path pattern is valid"));

/// Strip filesystem paths from program output.
///
/// Order matters: the workspace directory is replaced literally first, then
/// Windows-style and finally Unix-style absolute paths.
pub fn sanitize_output(output: &str, temp_dir: &str) -> String {
    let sanitized = if temp_dir.is_empty() {
        output.to_string()
    } else {
        output.replace(temp_dir, TEMPDIR_PLACEHOLDER)
    };
    let sanitized = WINDOWS_PATH.replace_all(&sanitized, FILEPATH_PLACEHOLDER);
    UNIX_PATH
        .replace_all(&sanitized, FILEPATH_PLACEHOLDER)
        .into_owned()
}

/// Escape text for inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            '\0' => escaped.push('\u{FFFD}'),
            c => escaped.push(c),
        }
    }
    escaped
}
