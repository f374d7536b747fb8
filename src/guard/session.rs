//! Session credential and onboarding status, as read from cookies.

use secrecy::{ExposeSecret, SecretString};

/// Values that mean "no session" even though a cookie is present.
///
/// These show up when an optional token is stringified before being stored.
const NO_SESSION_SENTINELS: [&str; 3] = ["", "null", "undefined"];

/// Whether a raw credential value names an actual session.
pub fn is_no_session(raw: Option<&str>) -> bool {
    match raw {
        None => true,
        Some(value) => NO_SESSION_SENTINELS.contains(&value.trim()),
    }
}

/// A normalized bearer token. Only constructed for real sessions.
#[derive(Clone)]
pub struct SessionCredential(SecretString);

impl SessionCredential {
    /// Normalize a raw cookie value; sentinels and absence yield `None`.
    pub fn from_cookie(raw: Option<&str>) -> Option<Self> {
        if is_no_session(raw) {
            return None;
        }
        raw.map(|value| Self(SecretString::from(value.trim().to_string())))
    }

    /// The token, for building an `Authorization` header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionCredential([REDACTED])")
    }
}

/// Tri-state onboarding flag from the `onboarding_complete` cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStatus {
    Absent,
    Incomplete,
    Complete,
}

impl OnboardingStatus {
    /// Only the literal `"true"` counts as complete.
    pub fn from_cookie(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Absent,
            Some("true") => Self::Complete,
            Some(_) => Self::Incomplete,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}
