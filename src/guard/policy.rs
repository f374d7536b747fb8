//! The guard's decision procedure: a pure function of (state, path).

use crate::config::GuardConfig;
use crate::error::ConfigError;

use super::routes::{RouteClassification, RouteKind};
use super::session::{OnboardingStatus, SessionCredential};

/// Per-request session state, derived from the two cookies.
///
/// The guard never moves a session between states; login sets the
/// credential and onboarding completion sets the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Anonymous,
    AuthenticatedIncomplete,
    AuthenticatedComplete,
}

impl GuardState {
    /// Derive the state. With onboarding untracked every session counts as onboarded.
    pub fn derive(
        credential: Option<&SessionCredential>,
        onboarding: OnboardingStatus,
        track_onboarding: bool,
    ) -> Self {
        match credential {
            None => Self::Anonymous,
            Some(_) if !track_onboarding || onboarding.is_complete() => {
                Self::AuthenticatedComplete
            }
            Some(_) => Self::AuthenticatedIncomplete,
        }
    }
}

impl std::fmt::Display for GuardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Anonymous => "anonymous",
            Self::AuthenticatedIncomplete => "authenticated_incomplete",
            Self::AuthenticatedComplete => "authenticated_complete",
        };
        write!(f, "{s}")
    }
}

/// Why a request was redirected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    PrivateRoute,
    OnboardingIncomplete,
    AlreadyAuthenticated,
}

impl std::fmt::Display for RedirectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PrivateRoute => write!(f, "attempted to access private route"),
            Self::OnboardingIncomplete => write!(f, "onboarding not complete"),
            Self::AlreadyAuthenticated => write!(f, "already logged in, bypass public routes"),
        }
    }
}

/// Outcome of evaluating the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect {
        location: String,
        reason: RedirectReason,
    },
}

/// The guard policy: route classification plus the fixed redirect targets.
#[derive(Debug, Clone)]
pub struct GuardPolicy {
    routes: RouteClassification,
    landing_route: String,
    anonymous_route: String,
    track_onboarding: bool,
}

impl GuardPolicy {
    pub fn new(
        routes: RouteClassification,
        landing_route: impl Into<String>,
        anonymous_route: impl Into<String>,
        track_onboarding: bool,
    ) -> Self {
        Self {
            routes,
            landing_route: landing_route.into(),
            anonymous_route: anonymous_route.into(),
            track_onboarding,
        }
    }

    /// Build the policy from configuration, validating the classification.
    pub fn from_config(config: &GuardConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.classification()?,
            config.landing_route.clone(),
            config.anonymous_route.clone(),
            config.track_onboarding,
        ))
    }

    pub fn tracks_onboarding(&self) -> bool {
        self.track_onboarding
    }

    /// Decide what happens to a request in `state` asking for `path`.
    pub fn evaluate(&self, state: GuardState, path: &str) -> Decision {
        let kind = self.routes.classify(path);

        match (state, kind) {
            (GuardState::Anonymous, RouteKind::Protected) => {
                self.redirect(&self.anonymous_route, RedirectReason::PrivateRoute)
            }
            (GuardState::Anonymous, _) => Decision::Allow,
            (GuardState::AuthenticatedIncomplete, RouteKind::Onboarding) => Decision::Allow,
            (GuardState::AuthenticatedIncomplete, _) => self.redirect(
                self.routes.onboarding_route(),
                RedirectReason::OnboardingIncomplete,
            ),
            (GuardState::AuthenticatedComplete, RouteKind::Public | RouteKind::Onboarding) => {
                self.redirect(&self.landing_route, RedirectReason::AlreadyAuthenticated)
            }
            (GuardState::AuthenticatedComplete, RouteKind::Protected) => Decision::Allow,
        }
    }

    fn redirect(&self, location: &str, reason: RedirectReason) -> Decision {
        Decision::Redirect {
            location: location.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBLIC: [&str; 3] = ["/", "/login", "/signup"];
    const PROTECTED: [&str; 4] = ["/chat", "/chat/42", "/settings", "/login/extra"];

    fn policy(track_onboarding: bool) -> GuardPolicy {
        let routes = RouteClassification::new(PUBLIC, "/onboarding").unwrap();
        GuardPolicy::new(routes, "/chat", "/", track_onboarding)
    }

    fn state(credential: Option<&str>, onboarding: Option<&str>) -> GuardState {
        let credential = SessionCredential::from_cookie(credential);
        GuardState::derive(
            credential.as_ref(),
            OnboardingStatus::from_cookie(onboarding),
            true,
        )
    }

    fn redirect_to(decision: &Decision) -> Option<&str> {
        match decision {
            Decision::Redirect { location, .. } => Some(location.as_str()),
            Decision::Allow => None,
        }
    }

    #[test]
    fn anonymous_reaches_public_routes() {
        let policy = policy(true);
        for path in PUBLIC {
            assert_eq!(policy.evaluate(GuardState::Anonymous, path), Decision::Allow);
        }
    }

    #[test]
    fn anonymous_is_sent_home_from_protected_routes() {
        let policy = policy(true);
        for raw in [None, Some(""), Some("null"), Some("undefined")] {
            let state = state(raw, None);
            assert_eq!(state, GuardState::Anonymous);
            for path in PROTECTED {
                let decision = policy.evaluate(state, path);
                assert_eq!(redirect_to(&decision), Some("/"), "{raw:?} on {path}");
            }
        }
    }

    #[test]
    fn anonymous_may_visit_onboarding() {
        let decision = policy(true).evaluate(GuardState::Anonymous, "/onboarding");
        assert_eq!(decision, Decision::Allow);
    }

    #[test]
    fn undefined_string_credential_on_chat_redirects_home() {
        let decision = policy(true).evaluate(state(Some("undefined"), None), "/chat");
        assert_eq!(
            decision,
            Decision::Redirect {
                location: "/".into(),
                reason: RedirectReason::PrivateRoute,
            }
        );
    }

    #[test]
    fn incomplete_session_is_confined_to_onboarding() {
        let policy = policy(true);
        for onboarding in [None, Some("false"), Some("yes")] {
            let state = state(Some("abc123"), onboarding);
            assert_eq!(state, GuardState::AuthenticatedIncomplete);
            for path in PUBLIC.iter().chain(PROTECTED.iter()) {
                let decision = policy.evaluate(state, path);
                assert_eq!(redirect_to(&decision), Some("/onboarding"));
            }
            assert_eq!(policy.evaluate(state, "/onboarding"), Decision::Allow);
        }
    }

    #[test]
    fn complete_session_skips_public_and_onboarding() {
        let policy = policy(true);
        let state = state(Some("abc123"), Some("true"));
        for path in PUBLIC.iter().chain(["/onboarding"].iter()) {
            let decision = policy.evaluate(state, path);
            assert_eq!(redirect_to(&decision), Some("/chat"), "{path}");
        }
        for path in PROTECTED {
            assert_eq!(policy.evaluate(state, path), Decision::Allow);
        }
    }

    #[test]
    fn untracked_onboarding_treats_sessions_as_complete() {
        let credential = SessionCredential::from_cookie(Some("abc123"));
        let state = GuardState::derive(credential.as_ref(), OnboardingStatus::Absent, false);
        assert_eq!(state, GuardState::AuthenticatedComplete);
        assert_eq!(policy(false).evaluate(state, "/chat"), Decision::Allow);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let policy = policy(true);
        let states = [
            GuardState::Anonymous,
            GuardState::AuthenticatedIncomplete,
            GuardState::AuthenticatedComplete,
        ];
        for state in states {
            for path in PUBLIC.iter().chain(PROTECTED.iter()).chain(["/onboarding"].iter()) {
                assert_eq!(policy.evaluate(state, path), policy.evaluate(state, path));
            }
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(GuardState::Anonymous.to_string(), "anonymous");
        assert_eq!(
            RedirectReason::OnboardingIncomplete.to_string(),
            "onboarding not complete"
        );
    }
}
