// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Submission input validation.
//!
//! Pure functions only. Rules apply in order and the first failure wins:
//! presence, length bounds, email shape.

use std::sync::LazyLock;

use postbox_core::PostboxError;
use regex::Regex;

/// Maximum name length in characters.
pub const MAX_NAME_CHARS: usize = 100;

/// Maximum message length in characters, measured before encryption.
pub const MAX_MESSAGE_CHARS: usize = 500;

/// ASCII letters/digits/`_.+-` locally, letters/digits/`-` for host labels,
/// permissive trailing TLD. Deliberately simple: real deliverability checks
/// belong to whoever reads the submissions.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.+-]+@[A-Za-z0-9-]+\.[A-Za-z0-9-.]+$")
        .expect("email pattern is a valid regex")
});

/// Validate a submission. Returns the rejection reason on failure.
pub fn validate_submission(name: &str, email: &str, message: &str) -> Result<(), PostboxError> {
    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(PostboxError::Validation("all fields required".to_string()));
    }

    if name.chars().count() > MAX_NAME_CHARS || message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(PostboxError::Validation("too long".to_string()));
    }

    if !EMAIL_RE.is_match(email) {
        return Err(PostboxError::Validation("invalid email".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(result: Result<(), PostboxError>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn valid_submission_passes() {
        assert!(validate_submission("Ada", "ada@example.com", "Hello").is_ok());
    }

    #[test]
    fn any_empty_field_is_required_error() {
        for (name, email, message) in [
            ("", "a@b.com", "hi"),
            ("Ada", "", "hi"),
            ("Ada", "a@b.com", ""),
            ("", "", ""),
        ] {
            assert_eq!(
                reason(validate_submission(name, email, message)),
                "all fields required"
            );
        }
    }

    #[test]
    fn presence_check_wins_over_email_check() {
        // Empty name with a broken email still reports the required reason.
        assert_eq!(
            reason(validate_submission("", "not-an-email", "hi")),
            "all fields required"
        );
    }

    #[test]
    fn overlong_name_is_too_long() {
        let name = "a".repeat(MAX_NAME_CHARS + 1);
        assert_eq!(
            reason(validate_submission(&name, "a@b.com", "hi")),
            "too long"
        );
    }

    #[test]
    fn overlong_message_is_too_long() {
        let message = "x".repeat(MAX_MESSAGE_CHARS + 1);
        assert_eq!(
            reason(validate_submission("Ada", "a@b.com", &message)),
            "too long"
        );
    }

    #[test]
    fn limits_are_inclusive() {
        let name = "a".repeat(MAX_NAME_CHARS);
        let message = "x".repeat(MAX_MESSAGE_CHARS);
        assert!(validate_submission(&name, "a@b.com", &message).is_ok());
    }

    #[test]
    fn length_is_measured_in_chars_not_bytes() {
        // 500 multibyte chars is 1500 bytes but still within the limit.
        let message = "é".repeat(MAX_MESSAGE_CHARS);
        assert!(validate_submission("Ada", "a@b.com", &message).is_ok());
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in [
            "nodomain",
            "a@b",
            "a@@b.com",
            "@example.com",
            "user@",
            "user@.com",
            "user name@example.com",
        ] {
            assert_eq!(
                reason(validate_submission("Ada", email, "hi")),
                "invalid email",
                "expected rejection for {email}"
            );
        }
    }

    #[test]
    fn well_formed_emails_are_accepted() {
        for email in [
            "user@example.com",
            "user.name+tag@example.co",
            "a_b-c@my-host.org",
            "digits123@h0st.example.com",
        ] {
            assert!(
                validate_submission("Ada", email, "hi").is_ok(),
                "expected acceptance for {email}"
            );
        }
    }
}
