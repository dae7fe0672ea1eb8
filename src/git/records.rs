//! NUL-delimited record handling for git's `-z` output formats.

use std::ffi::OsString;

/// Split NUL-delimited output into records.
///
/// A single trailing NUL terminates the last record rather than opening an
/// empty one, and empty input yields no records at all. Empty records in the
/// middle of the stream are preserved.
pub fn split_nul(raw: &[u8]) -> impl Iterator<Item = &[u8]> + Clone {
    let body = raw.strip_suffix(b"\0").unwrap_or(raw);
    let count = if raw.is_empty() { 0 } else { usize::MAX };
    body.split(|b| *b == 0).take(count)
}

/// Convert raw path bytes from git into an `OsString` without loss.
///
/// On Unix the bytes are kept as-is, so paths that are not valid UTF-8
/// survive the round trip back into git arguments.
#[cfg(unix)]
pub fn os_string_from_bytes(bytes: &[u8]) -> OsString {
    use std::os::unix::ffi::OsStringExt;

    OsString::from_vec(bytes.to_vec())
}

/// Convert raw path bytes from git into an `OsString`.
///
/// Off Unix an `OsString` cannot hold arbitrary bytes, so invalid UTF-8 is
/// replaced with U+FFFD and such paths will not match on the way back to git.
#[cfg(not(unix))]
pub fn os_string_from_bytes(bytes: &[u8]) -> OsString {
    OsString::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Parse a NUL-delimited path list (`ls-files -z`, `diff --name-only -z`).
pub fn parse_path_list(raw: &[u8]) -> Vec<OsString> {
    split_nul(raw)
        .filter(|record| !record.is_empty())
        .map(os_string_from_bytes)
        .collect()
}
