//! Title sanitization and storage key derivation.

/// Derives a filesystem/key-safe name from a job title.
///
/// Every character outside `[A-Za-z0-9_-]` maps to `_`. The mapping is
/// pure and idempotent: sanitizing an already-safe string is a no-op.
pub fn safe_title(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Builds the storage key for a published artifact.
///
/// Layout is `<prefix>/<filename>`, or the bare filename when the
/// prefix is empty. Leading/trailing slashes in the prefix are
/// stripped so keys never start with `/` or contain `//`.
pub fn build_output_key(prefix: &str, filename: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        filename.to_string()
    } else {
        format!("{}/{}", prefix, filename)
    }
}
