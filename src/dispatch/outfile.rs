/// Output file naming.
use std::path::Path;

/// Appended to the log file's name to form the parsed log's name.
pub const OUTPUT_SUFFIX: &str = "--output.log";

/// Derive the parsed log name from a log file path: the text after the last
/// `/` or `\` plus [`OUTPUT_SUFFIX`]. Both separators count on every platform.
#[must_use]
pub fn derive_outfile(logfile: &str) -> String {
    let base = logfile
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(logfile);
    format!("{base}{OUTPUT_SUFFIX}")
}

/// `explicit` when non-empty, otherwise the derived name.
#[must_use]
pub fn resolve_outfile(logfile: &Path, explicit: &str) -> String {
    if explicit.is_empty() {
        derive_outfile(&logfile.to_string_lossy())
    } else {
        explicit.to_owned()
    }
}
