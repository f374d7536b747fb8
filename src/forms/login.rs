use serde::Deserialize;

use super::{FormErrors, check_email};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    /// `required_domain` restricts which addresses may log in; empty allows any.
    pub fn validate(&self, required_domain: &str) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        check_email(&mut errors, &self.email);
        if !errors.has("email") && !required_domain.is_empty() && !self.email.ends_with(required_domain)
        {
            errors.push("email", format!("Email must use the {required_domain} domain"));
        }
        errors.into_result()
    }
}
