//! Request input validation

use crate::{PostboxError, Result};
use postbox_types::MAX_POST_CHARS;

/// Minimum password length accepted at signup, in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Loose address check: one `@`, a non-empty local part and a dotted domain
/// without empty labels.
pub fn validate_email(email: &str) -> Result<()> {
    let invalid = || PostboxError::Validation(format!("invalid email address: {email:?}"));

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(PostboxError::Validation(format!(
            "password must be at least {MIN_PASSWORD_CHARS} characters"
        )));
    }
    Ok(())
}

pub fn validate_post_text(text: &str) -> Result<()> {
    // Byte length is an upper bound on the char count, so skip counting short texts.
    if text.len() > MAX_POST_CHARS && text.chars().count() > MAX_POST_CHARS {
        return Err(PostboxError::Validation(format!(
            "text must be at most {MAX_POST_CHARS} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("first.last@mail.example.org").is_ok());

        for bad in ["", "ax.com", "@x.com", "a@", "a@x", "a@x.", "a@.com", "a@@x.com", "a b@x.com"] {
            assert!(
                matches!(validate_email(bad), Err(PostboxError::Validation(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("secret").is_ok());
        assert!(validate_password("short").is_err());
        // Six characters, more than six bytes
        assert!(validate_password("pässwö").is_ok());
    }

    #[test]
    fn test_post_text_boundary() {
        assert!(validate_post_text("").is_ok());
        assert!(validate_post_text(&"a".repeat(MAX_POST_CHARS)).is_ok());
        assert!(validate_post_text(&"a".repeat(MAX_POST_CHARS + 1)).is_err());
    }

    #[test]
    fn test_post_text_counts_chars_not_bytes() {
        assert!(validate_post_text(&"é".repeat(MAX_POST_CHARS)).is_ok());
        assert!(validate_post_text(&"é".repeat(MAX_POST_CHARS + 1)).is_err());
    }
}
