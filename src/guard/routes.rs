//! Static partition of the path space into public, onboarding and protected.

use std::collections::BTreeSet;

use crate::error::ConfigError;

/// Which category a path falls into. Exactly one applies to any path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Public,
    Onboarding,
    Protected,
}

/// Immutable route classification, built once at startup.
#[derive(Debug, Clone)]
pub struct RouteClassification {
    public: BTreeSet<String>,
    onboarding: String,
}

impl RouteClassification {
    /// Build a classification. The onboarding path may not also be public.
    pub fn new<I, S>(public: I, onboarding: &str) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let public: BTreeSet<String> = public.into_iter().map(Into::into).collect();

        for path in public.iter().map(String::as_str).chain([onboarding]) {
            if !path.starts_with('/') {
                return Err(ConfigError::RelativeRoute {
                    path: path.to_string(),
                });
            }
        }

        if public.contains(onboarding) {
            return Err(ConfigError::OnboardingIsPublic {
                path: onboarding.to_string(),
            });
        }

        Ok(Self {
            public,
            onboarding: onboarding.to_string(),
        })
    }

    pub fn classify(&self, path: &str) -> RouteKind {
        if path == self.onboarding {
            RouteKind::Onboarding
        } else if self.public.contains(path) {
            RouteKind::Public
        } else {
            RouteKind::Protected
        }
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.classify(path) == RouteKind::Public
    }

    pub fn is_onboarding(&self, path: &str) -> bool {
        self.classify(path) == RouteKind::Onboarding
    }

    pub fn onboarding_route(&self) -> &str {
        &self.onboarding
    }
}
