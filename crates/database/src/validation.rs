//! Input validation for attendance writes.

use std::fmt;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// User ids are assigned by the platform and always positive.
    InvalidUserId(i64),
    /// Value too long.
    TooLong { field: String, max: usize, actual: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidUserId(id) => write!(f, "Invalid user id: {}", id),
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum allowed length for visit notes.
pub const MAX_NOTE_LENGTH: usize = 500;

/// Maximum allowed length for usernames and name parts.
pub const MAX_NAME_LENGTH: usize = 128;

pub fn validate_user_id(user_id: i64) -> Result<(), ValidationError> {
    if user_id <= 0 {
        return Err(ValidationError::InvalidUserId(user_id));
    }
    Ok(())
}

/// Normalize a visit note.
///
/// Whitespace is trimmed and a blank note becomes `None`.
pub fn normalize_note(note: Option<&str>) -> Result<Option<String>, ValidationError> {
    normalize_text("note", note, MAX_NOTE_LENGTH)
}

/// Normalize a username or name part the same way as notes.
pub fn normalize_name(field: &str, value: Option<&str>) -> Result<Option<String>, ValidationError> {
    normalize_text(field, value, MAX_NAME_LENGTH)
}

fn normalize_text(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
            actual: len,
        });
    }

    Ok(Some(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id() {
        assert!(validate_user_id(123456789).is_ok());
        assert_eq!(validate_user_id(0), Err(ValidationError::InvalidUserId(0)));
        assert!(validate_user_id(-5).is_err());
    }

    #[test]
    fn test_note_normalization() {
        assert_eq!(normalize_note(None).unwrap(), None);
        assert_eq!(normalize_note(Some("   ")).unwrap(), None);
        assert_eq!(
            normalize_note(Some("  client visit ")).unwrap(),
            Some("client visit".to_string())
        );
    }

    #[test]
    fn test_note_too_long() {
        let long = "x".repeat(MAX_NOTE_LENGTH + 1);
        assert!(matches!(
            normalize_note(Some(&long)),
            Err(ValidationError::TooLong { max: MAX_NOTE_LENGTH, .. })
        ));
        // Multi-byte characters count once each
        let cyrillic = "д".repeat(MAX_NOTE_LENGTH);
        assert!(normalize_note(Some(&cyrillic)).is_ok());
    }
}
