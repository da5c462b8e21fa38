/// Turn the single-line input box into the stdin a program reads line by line.
///
/// Segments are separated by `;` and trimmed, so `"a; b ;c"` becomes
/// `"a\nb\nc"`. No trailing newline is added.
pub fn prepare_stdin(raw: &str) -> String {
    raw.split(';').map(str::trim).collect::<Vec<_>>().join("\n")
}
