//! Form validation for the login, signup and onboarding pages.
//!
//! Each form reports every failing field at once, so the page can show all
//! messages in one round trip.

pub mod login;
pub mod onboarding;
pub mod signup;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub use login::LoginForm;
pub use onboarding::OnboardingForm;
pub use signup::SignupForm;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All failed constraints of one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    pub errors: Vec<FieldError>,
}

impl FormErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok(())` when nothing failed.
    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Check a string's length in characters against inclusive bounds.
pub(crate) fn check_length(
    errors: &mut FormErrors,
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) {
    let len = value.chars().count();
    if len < min {
        errors.push(field, format!("Must be at least {min} characters"));
    } else if len > max {
        errors.push(field, format!("Cannot exceed {max} characters"));
    }
}

/// Email syntax plus the 5–50 character bound shared by login and signup.
pub(crate) fn check_email(errors: &mut FormErrors, value: &str) {
    let len = value.chars().count();
    if !EMAIL.is_match(value) {
        errors.push("email", "Please enter a valid email address");
    } else if len < 5 {
        errors.push("email", "Email must be at least 5 characters");
    } else if len > 50 {
        errors.push("email", "Email cannot exceed 50 characters");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        for ok in ["ada@tcu.edu", "a.b+c@example.co.uk"] {
            let mut errors = FormErrors::default();
            check_email(&mut errors, ok);
            assert!(errors.is_empty(), "{ok} should be valid");
        }
        for bad in ["", "ada", "ada@", "@tcu.edu", "ada @tcu.edu", "ada@tcu"] {
            let mut errors = FormErrors::default();
            check_email(&mut errors, bad);
            assert!(errors.has("email"), "{bad} should be invalid");
        }
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let mut errors = FormErrors::default();
        check_length(&mut errors, "first_name", "Zoë", 2, 3);
        assert!(errors.is_empty());

        check_length(&mut errors, "first_name", "Z", 2, 3);
        check_length(&mut errors, "last_name", "Zoëy", 2, 3);
        assert!(errors.has("first_name"));
        assert!(errors.has("last_name"));
        assert!(errors.into_result().is_err());
    }
}
