//! Axum middleware applying the guard policy to every request.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use tracing::{debug, warn};

use super::policy::{Decision, GuardPolicy, GuardState};
use super::session::{OnboardingStatus, SessionCredential};
use super::UserDirectory;
use crate::api::UserProfile;
use crate::config::{GuardConfig, ONBOARDING_COOKIE};
use crate::error::ConfigError;

/// Identity resolved by the guard, attached to allowed requests.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub state: GuardState,
    pub credential: Option<SessionCredential>,
    pub user: Option<UserProfile>,
}

/// Shared state for the guard middleware.
#[derive(Clone)]
pub struct GuardLayerState {
    pub policy: Arc<GuardPolicy>,
    /// User lookup. `None` skips enrichment entirely.
    pub users: Option<Arc<dyn UserDirectory>>,
    pub auth_cookie: Arc<str>,
    pub require_user: bool,
    pub user_timeout: Duration,
}

impl GuardLayerState {
    pub fn from_config(
        config: &GuardConfig,
        users: Option<Arc<dyn UserDirectory>>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            policy: Arc::new(GuardPolicy::from_config(config)?),
            users,
            auth_cookie: Arc::from(config.auth_cookie.as_str()),
            require_user: config.require_user,
            user_timeout: config.user_timeout,
        })
    }

    /// Look up the user, treating a timeout like any other failed call.
    async fn resolve_user(&self, credential: &SessionCredential) -> Option<UserProfile> {
        let users = self.users.as_ref()?;
        match tokio::time::timeout(self.user_timeout, users.lookup(credential)).await {
            Ok(Ok(user)) => Some(user),
            Ok(Err(e)) => {
                warn!(error = %e, "User lookup failed");
                None
            }
            Err(_) => {
                warn!(timeout = ?self.user_timeout, "User lookup timed out");
                None
            }
        }
    }
}

/// Guard middleware, for use with `axum::middleware::from_fn_with_state`.
pub async fn guard_middleware(
    State(guard): State<GuardLayerState>,
    mut req: Request,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(req.headers());
    let mut credential =
        SessionCredential::from_cookie(jar.get(&guard.auth_cookie).map(|c| c.value()));
    let onboarding = OnboardingStatus::from_cookie(jar.get(ONBOARDING_COOKIE).map(|c| c.value()));

    let path = req.uri().path().to_string();
    let policy = &guard.policy;

    // A required user must resolve before the decision, on every path.
    let strict = guard.require_user && guard.users.is_some();
    let mut user = None;
    if strict {
        if let Some(cred) = credential.take() {
            user = guard.resolve_user(&cred).await;
            if user.is_some() {
                credential = Some(cred);
            } else {
                debug!(path = %path, "User unresolved, treating request as anonymous");
            }
        }
    }

    let state = GuardState::derive(credential.as_ref(), onboarding, policy.tracks_onboarding());

    if let Decision::Redirect { location, reason } = policy.evaluate(state, &path) {
        debug!(path = %path, %state, %reason, location = %location, "Redirected by guard");
        return redirect(&location);
    }

    if !strict {
        if let Some(ref cred) = credential {
            user = guard.resolve_user(cred).await;
        }
    }

    req.extensions_mut().insert(RequestContext {
        state,
        credential,
        user,
    });

    next.run(req).await
}

/// 303 See Other with an empty body.
fn redirect(location: &str) -> Response {
    (StatusCode::SEE_OTHER, [(header::LOCATION, location.to_string())]).into_response()
}
