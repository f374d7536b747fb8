use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::{FormErrors, OnboardingForm, check_email};
use crate::api::NewUser;

static PASSWORD_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[A-Za-z0-9!@#$%^&*(),.?":{}|<>]+$"#).unwrap());

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub university: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);

        // Profile fields may also be filled in later during onboarding.
        if self.has_profile_fields() {
            self.profile().check(&mut errors);
        }
        errors.into_result()
    }

    fn has_profile_fields(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.student_id,
            &self.university,
        ]
        .iter()
        .any(|f| !f.is_empty())
    }

    fn profile(&self) -> OnboardingForm {
        OnboardingForm {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            university: self.university.clone(),
            student_id: self.student_id.clone(),
        }
    }
}

impl From<SignupForm> for NewUser {
    fn from(form: SignupForm) -> Self {
        Self {
            email: form.email.trim().to_string(),
            password: form.password,
            student_id: form.student_id,
            first_name: form.first_name,
            last_name: form.last_name,
            university: form.university,
        }
    }
}

fn check_password(errors: &mut FormErrors, password: &str) {
    let len = password.chars().count();
    if len < 8 {
        errors.push("password", "Password must be at least 8 characters");
    } else if len > 50 {
        errors.push("password", "Password cannot exceed 50 characters");
    } else if !PASSWORD_CHARSET.is_match(password)
        || !password.chars().any(|c| c.is_ascii_uppercase())
        || !password.chars().any(|c| c.is_ascii_digit())
    {
        errors.push(
            "password",
            "Password must contain at least one uppercase letter and one number",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str, password: &str) -> SignupForm {
        SignupForm {
            email: email.into(),
            password: password.into(),
            ..SignupForm::default()
        }
    }

    #[test]
    fn strong_password_passes() {
        assert!(form("ada@tcu.edu", "Analytical1!").validate().is_ok());
    }

    #[test]
    fn weak_passwords_fail() {
        for password in ["short1A", "alllowercase1", "NODIGITSHERE", "Has Space1", "x".repeat(51).as_str()] {
            let errors = form("ada@tcu.edu", password).validate().unwrap_err();
            assert!(errors.has("password"), "{password} should be rejected");
        }
    }

    #[test]
    fn reports_email_and_password_together() {
        let errors = form("bad", "weak").validate().unwrap_err();
        assert!(errors.has("email"));
        assert!(errors.has("password"));
    }

    #[test]
    fn partial_profile_is_validated() {
        let mut signup = form("ada@tcu.edu", "Analytical1!");
        signup.first_name = "A".into();
        let errors = signup.validate().unwrap_err();
        assert!(errors.has("first_name"));
        assert!(errors.has("university"));
    }
}
