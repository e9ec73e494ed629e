//! Input validation for client-supplied fields. Limits are deliberately
//! generous; the point is to reject junk (blank titles, control characters,
//! unbounded payloads) before it reaches storage.

use crate::game::errors::GameError;

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_NAME_LENGTH: usize = 60;
pub const MAX_TAG_LENGTH: usize = 40;
pub const MAX_TAGS: usize = 16;

/// Field validation errors with client-facing messages.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} is too long (maximum {max} characters)")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} contains control characters")]
    ControlCharacters { field: &'static str },

    #[error("too many tags (maximum {max})")]
    TooManyTags { max: usize },

    #[error("invalid email address")]
    InvalidEmail,
}

impl From<ValidationError> for GameError {
    fn from(err: ValidationError) -> Self {
        GameError::Validation(err.to_string())
    }
}

fn check_text(value: &str, field: &'static str, max: usize) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    if trimmed.chars().any(|c| c.is_control()) {
        return Err(ValidationError::ControlCharacters { field });
    }
    Ok(())
}

/// Quest titles.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    check_text(title, "title", MAX_TITLE_LENGTH)
}

/// Display names, guild names, reward names.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    check_text(name, "name", MAX_NAME_LENGTH)
}

pub fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.len() > MAX_TAGS {
        return Err(ValidationError::TooManyTags { max: MAX_TAGS });
    }
    for tag in tags {
        check_text(tag, "tag", MAX_TAG_LENGTH)?;
    }
    Ok(())
}

/// Shape check only: one `@` with non-empty local and domain parts, a dot
/// in the domain. Real address verification belongs to the identity
/// provider.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ValidationError::InvalidEmail);
    }
    if email.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_title_rejected() {
        assert!(validate_title("   ").is_err());
        assert!(validate_title("Morning run").is_ok());
    }

    #[test]
    fn overlong_title_rejected() {
        let long = "x".repeat(MAX_TITLE_LENGTH + 1);
        assert!(validate_title(&long).is_err());
    }

    #[test]
    fn control_characters_rejected() {
        assert!(validate_name("evil\u{0007}name").is_err());
    }

    #[test]
    fn tag_limits() {
        let too_many: Vec<String> = (0..MAX_TAGS + 1).map(|i| format!("tag{}", i)).collect();
        assert!(validate_tags(&too_many).is_err());
        assert!(validate_tags(&["health".to_string()]).is_ok());
    }

    #[test]
    fn email_shapes() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("alice").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("alice@nodot").is_err());
        assert!(validate_email("al ice@example.com").is_err());
    }
}
