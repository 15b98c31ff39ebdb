use crate::error::AppError;

/// Longest accepted title or location, in Unicode characters.
pub const MAX_TEXT_CHARS: usize = 256;

/// Validate a trimmed title (1-256 Unicode characters).
pub fn validate_title(title: &str) -> Result<(), AppError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > MAX_TEXT_CHARS {
        return Err(AppError::Validation(
            "Title must be 1-256 characters".into(),
        ));
    }
    Ok(())
}

/// Validate a free-text location (0-256 Unicode characters).
pub fn validate_location(location: &str) -> Result<(), AppError> {
    if location.trim().chars().count() > MAX_TEXT_CHARS {
        return Err(AppError::Validation(
            "Location must be at most 256 characters".into(),
        ));
    }
    Ok(())
}

/// Parse a path id into a UUID, returning `None` for malformed input.
///
/// Mutations on ids that cannot exist are treated as no-ops, not errors.
pub fn parse_id(id: &str) -> Option<uuid::Uuid> {
    uuid::Uuid::parse_str(id.trim()).ok()
}
