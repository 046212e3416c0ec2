//! Input rules shared by the manager and the authentication gate.

use validator::ValidateEmail;

use crate::domain::error::DomainError;

pub const MIN_USER_NAME: usize = 3;
pub const MIN_PASSWORD: usize = 8;
pub const MIN_EVENT_NAME: usize = 3;
pub const MIN_EVENT_DESCRIPTION: usize = 10;
pub const MIN_EVENT_LOCATION: usize = 3;

/// Length is counted in characters, not bytes.
pub fn min_chars(field: &str, value: &str, min: usize) -> Result<(), DomainError> {
    if value.chars().count() < min {
        return Err(DomainError::validation(
            field,
            format!("must be at least {min} characters"),
        ));
    }
    Ok(())
}

pub fn email(value: &str) -> Result<(), DomainError> {
    if !value.validate_email() {
        return Err(DomainError::validation("email", "must be a valid email address"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_chars_counts_unicode_scalars() {
        assert!(min_chars("name", "äöü", 3).is_ok());
        assert!(min_chars("name", "ab", 3).is_err());
    }

    #[test]
    fn email_shape() {
        assert!(email("a@x.com").is_ok());
        assert!(email("not-an-email").is_err());
        assert!(email("").is_err());
    }

    #[test]
    fn validation_error_names_field() {
        match min_chars("description", "short", MIN_EVENT_DESCRIPTION) {
            Err(DomainError::Validation { field, message }) => {
                assert_eq!(field, "description");
                assert!(message.contains("10"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
