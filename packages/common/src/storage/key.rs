use super::error::StorageError;

/// Validate an object key: relative, `/`-separated, no empty or dot-prefixed segments.
///
/// Dot-prefixed segments are reserved for backend bookkeeping such as the
/// filesystem store's `.tmp` directory.
pub fn validate_key(key: &str) -> Result<&str, StorageError> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("key is empty".into()));
    }
    if key.contains('\0') || key.contains('\\') {
        return Err(StorageError::InvalidKey(format!(
            "key contains a forbidden character: {key}"
        )));
    }
    if key.starts_with('/') {
        return Err(StorageError::InvalidKey(format!("key must be relative: {key}")));
    }
    if key
        .split('/')
        .any(|seg| seg.is_empty() || seg.starts_with('.'))
    {
        return Err(StorageError::InvalidKey(format!(
            "key has an empty or dot-prefixed segment: {key}"
        )));
    }
    Ok(key)
}

/// Public URL under which an object is served.
pub fn public_url(base_url: &str, key: &str) -> String {
    format!("{}/media/{key}", base_url.trim_end_matches('/'))
}
