//! Lookup key normalisation and slash handling for manifest paths.

/// Produce the manifest lookup key for a requested asset path.
///
/// Every occurrence of the manifest directory token is removed from the path and the
/// result is given exactly one leading slash, matching the keys Laravel Mix writes.
pub fn normalize_key(path: &str, manifest_directory: &str) -> String {
    let stripped = if manifest_directory.is_empty() {
        path.to_string()
    } else {
        path.replace(manifest_directory, "")
    };
    format!("/{}", stripped.trim_start_matches('/'))
}

/// Remove all leading slashes from a manifest value.
pub fn strip_leading_slashes(value: &str) -> &str {
    value.trim_start_matches('/')
}

/// Append a `/` unless the value already ends with one.
pub fn trailing_slash(value: &str) -> String {
    format!("{}/", value.trim_end_matches(['/', '\\']))
}
