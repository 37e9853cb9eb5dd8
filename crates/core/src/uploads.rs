//! Naming conventions for files written to the upload root.
//!
//! Stored names are `{unix_millis}-{random}-{original}` so two uploads of the
//! same file never collide while the original name stays readable on disk.

use rand::Rng;

/// Upper bound (exclusive) of the random component of a stored name.
pub const RANDOM_SUFFIX_BOUND: u32 = 1_000_000_000;

/// Name used when the client sent no usable original filename.
const FALLBACK_NAME: &str = "upload";

/// Longest sanitized name kept in a stored filename, in bytes.
pub const MAX_SANITIZED_LEN: usize = 100;

/// Longest trailing `.ext` preserved when a name is shortened.
const MAX_EXTENSION_LEN: usize = 16;

/// Build a stored filename from its parts.
pub fn storage_filename(original: &str, unix_millis: i64, random: u32) -> String {
    format!("{unix_millis}-{random}-{}", sanitize_filename(original))
}

/// Build a fresh stored filename from the clock and a random suffix.
pub fn generate_storage_filename(original: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let random = rand::rng().random_range(0..RANDOM_SUFFIX_BOUND);
    storage_filename(original, millis, random)
}

/// Reduce a client-supplied filename to a safe single path component.
///
/// Directory parts are dropped and anything outside `[A-Za-z0-9._-]`
/// becomes `_`. Names made only of dots fall back to `upload`. Names longer
/// than [`MAX_SANITIZED_LEN`] are cut short, keeping the extension.
pub fn sanitize_filename(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.chars().all(|c| c == '.') {
        FALLBACK_NAME.to_string()
    } else {
        truncate_keeping_extension(cleaned)
    }
}

/// `name` is ASCII here, so byte offsets are char boundaries.
fn truncate_keeping_extension(name: String) -> String {
    if name.len() <= MAX_SANITIZED_LEN {
        return name;
    }
    let (stem, extension) = match name.rfind('.') {
        Some(dot) if dot > 0 && name.len() - dot <= MAX_EXTENSION_LEN => name.split_at(dot),
        _ => (name.as_str(), ""),
    };
    let keep = MAX_SANITIZED_LEN - extension.len();
    format!("{}{extension}", &stem[..keep])
}

/// Join the public URL prefix of the upload root with a stored filename.
pub fn public_media_path(prefix: &str, stored_name: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), stored_name)
}

/// Inverse of [`public_media_path`]: the stored filename a media path refers
/// to, or `None` when the path does not live under `prefix` (for example a
/// YouTube URL).
pub fn stored_name_for_path<'a>(prefix: &str, path: &'a str) -> Option<&'a str> {
    let prefix = prefix.trim_end_matches('/');
    let name = path.strip_prefix(prefix)?.strip_prefix('/')?;
    if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
        return None;
    }
    Some(name)
}
