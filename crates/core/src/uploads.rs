//! Upload filename sanitising and extension allow-list checks.
//!
//! Uploaded files are stored flat in a single directory under a sanitised
//! version of the client-supplied name. Two uploads that sanitise to the same
//! name overwrite each other.

use crate::error::CoreError;

/// Reduce a client-supplied filename to a safe, flat name.
///
/// - path separators (`/`, `\`) and whitespace runs become a single `_`
/// - only ASCII letters, digits, `_`, `.` and `-` survive
/// - leading and trailing `.` / `_` are stripped
///
/// Returns [`CoreError::InvalidFormat`] when nothing usable is left.
///
/// ```
/// use rubric_core::uploads::secure_filename;
///
/// assert_eq!(secure_filename("My Lecture 01.mp3").unwrap(), "My_Lecture_01.mp3");
/// assert_eq!(secure_filename("../../etc/passwd").unwrap(), "etc_passwd");
/// ```
pub fn secure_filename(raw: &str) -> Result<String, CoreError> {
    let spaced = raw.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    let name = kept.trim_matches(|c| c == '.' || c == '_');

    if name.is_empty() {
        return Err(CoreError::InvalidFormat(format!(
            "Filename '{raw}' has no usable characters"
        )));
    }
    Ok(name.to_string())
}

/// Lowercased extension after the final `.`, if any.
pub fn extension_of(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// True iff `filename` has an extension contained in `allowed`.
///
/// Comparison is case-insensitive; `allowed` entries are expected lowercase
/// without a leading dot.
pub fn has_allowed_extension(filename: &str, allowed: &[String]) -> bool {
    match extension_of(filename) {
        Some(ext) => allowed.iter().any(|a| a == &ext),
        None => false,
    }
}

/// Check a filename against an allow-list, producing the storage error on failure.
pub fn ensure_allowed_extension(filename: &str, allowed: &[String]) -> Result<(), CoreError> {
    if has_allowed_extension(filename, allowed) {
        Ok(())
    } else {
        Err(CoreError::InvalidFormat("Invalid file format.".into()))
    }
}

/// Content type for serving a stored file, derived from its extension.
pub fn content_type_for(filename: &str) -> &'static str {
    match extension_of(filename).as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        Some("aac") => "audio/aac",
        Some("flac") => "audio/flac",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Parse a comma-separated allow-list (`"mp3, WAV,ogg"`) into normalized entries.
pub fn parse_allow_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
