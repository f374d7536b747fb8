use serde::Deserialize;

use super::{FormErrors, check_length};
use crate::api::ProfileUpdate;

/// Profile fields collected on the onboarding page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OnboardingForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub student_id: String,
}

impl OnboardingForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        self.check(&mut errors);
        errors.into_result()
    }

    pub(crate) fn check(&self, errors: &mut FormErrors) {
        check_length(errors, "first_name", &self.first_name, 2, 50);
        check_length(errors, "last_name", &self.last_name, 2, 50);
        check_length(errors, "university", &self.university, 3, 100);
        check_length(errors, "student_id", &self.student_id, 2, 50);
    }
}

impl From<OnboardingForm> for ProfileUpdate {
    fn from(form: OnboardingForm) -> Self {
        Self {
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            university: form.university.trim().to_string(),
            student_id: form.student_id.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_profile_passes() {
        let form = OnboardingForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            university: "TCU".into(),
            student_id: "S1".into(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn every_failing_field_is_reported() {
        let form = OnboardingForm {
            first_name: "A".into(),
            last_name: "L".into(),
            university: "U".into(),
            student_id: String::new(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.errors.len(), 4);
        for field in ["first_name", "last_name", "university", "student_id"] {
            assert!(errors.has(field), "{field} should fail");
        }
    }

    #[test]
    fn university_upper_bound() {
        let form = OnboardingForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            university: "x".repeat(101),
            student_id: "S1".into(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.has("university"));
    }
}
