//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;
use crate::guard::RouteClassification;

/// Default cookie carrying the session credential.
pub const DEFAULT_AUTH_COOKIE: &str = "auth_token";

/// Cookie carrying the onboarding completion flag.
pub const ONBOARDING_COOKIE: &str = "onboarding_complete";

/// Portal configuration.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Port the portal listens on.
    pub port: u16,
    /// Base URL of the backend API, without trailing slash (e.g. `http://localhost:8000/api`).
    pub api_base_url: String,
    /// Guard configuration.
    pub guard: GuardConfig,
    /// Required email domain for the login form. Empty disables the check.
    pub login_domain: String,
    /// Whether session cookies carry the `Secure` attribute.
    pub secure_cookies: bool,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            port: 5173,
            api_base_url: "http://localhost:8000/api".to_string(),
            guard: GuardConfig::default(),
            login_domain: "@tcu.edu".to_string(),
            secure_cookies: false,
        }
    }
}

impl PortalConfig {
    /// Load configuration from `CHAT_PORTAL_*` environment variables, falling
    /// back to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = parse_var("CHAT_PORTAL_PORT")?.unwrap_or(defaults.port);
        let api_base_url = std::env::var("CHAT_PORTAL_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);
        let login_domain =
            std::env::var("CHAT_PORTAL_LOGIN_DOMAIN").unwrap_or(defaults.login_domain);
        let secure_cookies =
            parse_var("CHAT_PORTAL_SECURE_COOKIES")?.unwrap_or(defaults.secure_cookies);

        Ok(Self {
            port,
            api_base_url,
            guard: GuardConfig::from_env()?,
            login_domain,
            secure_cookies,
        })
    }
}

/// Configuration for the request authorization guard.
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Paths reachable without a session.
    pub public_routes: Vec<String>,
    /// The single route an authenticated but not yet onboarded session may visit.
    pub onboarding_route: String,
    /// Where fully authenticated sessions land.
    pub landing_route: String,
    /// Where anonymous sessions are sent.
    pub anonymous_route: String,
    /// Whether the onboarding cookie is consulted at all.
    pub track_onboarding: bool,
    /// Treat a failed user lookup as "no session".
    pub require_user: bool,
    /// Upper bound on the user lookup.
    pub user_timeout: Duration,
    /// Cookie carrying the session credential.
    pub auth_cookie: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            public_routes: vec!["/".into(), "/login".into(), "/signup".into()],
            onboarding_route: "/onboarding".to_string(),
            landing_route: "/chat".to_string(),
            anonymous_route: "/".to_string(),
            track_onboarding: true,
            require_user: false,
            user_timeout: Duration::from_secs(5),
            auth_cookie: DEFAULT_AUTH_COOKIE.to_string(),
        }
    }
}

impl GuardConfig {
    /// Load the guard settings from `CHAT_PORTAL_*` environment variables.
    ///
    /// `CHAT_PORTAL_PUBLIC_ROUTES` is a comma-separated path list. The
    /// anonymous redirect target is always `/`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let public_routes = std::env::var("CHAT_PORTAL_PUBLIC_ROUTES")
            .map(|raw| parse_route_list(&raw))
            .unwrap_or(defaults.public_routes);
        let onboarding_route =
            std::env::var("CHAT_PORTAL_ONBOARDING_PATH").unwrap_or(defaults.onboarding_route);
        let landing_route =
            std::env::var("CHAT_PORTAL_LANDING_PATH").unwrap_or(defaults.landing_route);
        let track_onboarding =
            parse_var("CHAT_PORTAL_TRACK_ONBOARDING")?.unwrap_or(defaults.track_onboarding);
        let require_user =
            parse_var("CHAT_PORTAL_REQUIRE_USER")?.unwrap_or(defaults.require_user);
        let user_timeout = parse_var::<u64>("CHAT_PORTAL_USER_TIMEOUT_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.user_timeout);
        let auth_cookie = std::env::var("CHAT_PORTAL_AUTH_COOKIE").unwrap_or(defaults.auth_cookie);

        Ok(Self {
            public_routes,
            onboarding_route,
            landing_route,
            anonymous_route: defaults.anonymous_route,
            track_onboarding,
            require_user,
            user_timeout,
            auth_cookie,
        })
    }

    /// Build the immutable route classification, rejecting inconsistent setups.
    pub fn classification(&self) -> Result<RouteClassification, ConfigError> {
        RouteClassification::new(self.public_routes.iter().cloned(), &self.onboarding_route)
    }
}

/// Split a comma-separated path list, dropping blank entries.
fn parse_route_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse an optional environment variable, failing on malformed values.
fn parse_var<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
