//! Page data and form actions, all served behind the authorization guard.

pub mod auth;
pub mod chat;
pub mod onboarding;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde_json::json;
use tracing::debug;
use tower_http::trace::TraceLayer;

use crate::api::ApiClient;
use crate::config::PortalConfig;
use crate::error::ApiError;
use crate::forms::FormErrors;
use crate::guard::{GuardLayerState, RequestContext, SessionCredential, guard_middleware};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub config: Arc<PortalConfig>,
}

impl AppState {
    /// A session cookie with the attributes every portal cookie shares.
    pub(crate) fn cookie(&self, name: &str, value: &str) -> Cookie<'static> {
        Cookie::build((name.to_string(), value.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.config.secure_cookies)
            .build()
    }

    /// A cookie matching `cookie(name, ..)`, for removal.
    pub(crate) fn expired_cookie(&self, name: &str) -> Cookie<'static> {
        Cookie::build((name.to_string(), String::new())).path("/").build()
    }

    pub(crate) fn auth_cookie_name(&self) -> &str {
        &self.config.guard.auth_cookie
    }
}

/// Build the portal router.
///
/// `/health` and `/logout` sit outside the guard: the first is for health checks,
/// the second must work for sessions the guard would confine to onboarding.
pub fn portal_routes(state: AppState, guard: GuardLayerState) -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route(
            "/onboarding",
            get(onboarding::onboarding_page).post(onboarding::complete_onboarding),
        )
        .route("/chat", get(chat::chat_layout).post(chat::start_chat))
        .route(
            "/chat/{conversation_id}",
            get(chat::conversation).post(chat::send_message),
        )
        .layer(from_fn_with_state(guard, guard_middleware))
        .route("/logout", get(auth::logout))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "chat-portal"
    }))
}

/// GET /
async fn landing() -> impl IntoResponse {
    Json(json!({
        "page": "landing",
        "links": { "login": "/login", "signup": "/signup" }
    }))
}

/// Failure of a page load or form action.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The submitted form failed validation.
    #[error("form has {} invalid field(s)", .0.errors.len())]
    Invalid(FormErrors),
    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The page needs a session the request does not carry.
    #[error("not logged in")]
    Unauthenticated,
    /// A page load failed and is shown as an error page.
    #[error("{0}")]
    Internal(String),
}

impl From<FormErrors> for PageError {
    fn from(e: FormErrors) -> Self {
        Self::Invalid(e)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        debug!(error = %self, "Page request failed");
        match self {
            Self::Invalid(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            Self::Api(e) => (
                e.status_code(),
                Json(json!({ "message": e.user_message() })),
            )
                .into_response(),
            Self::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Not logged in" })),
            )
                .into_response(),
            Self::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": message })),
            )
                .into_response(),
        }
    }
}

/// The credential the guard attached, or `Unauthenticated`.
pub(crate) fn credential(ctx: &RequestContext) -> Result<&SessionCredential, PageError> {
    ctx.credential.as_ref().ok_or(PageError::Unauthenticated)
}
