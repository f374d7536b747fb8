//! Login, signup and logout pages.

use axum::extract::State;
use axum::response::{IntoResponse, Redirect};
use axum::{Form, Json};
use axum_extra::extract::CookieJar;
use serde_json::json;
use tracing::{info, warn};

use super::{AppState, PageError};
use crate::api::NewUser;
use crate::config::ONBOARDING_COOKIE;
use crate::forms::{LoginForm, SignupForm};
use crate::guard::SessionCredential;

/// GET /login
pub async fn login_page(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "page": "login",
        "fields": ["email", "password"],
        "required_domain": state.config.login_domain,
    }))
}

/// POST /login
///
/// Sets the session cookie, plus the onboarding flag derived from the
/// user's profile, then sends the browser where the guard would anyway.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), PageError> {
    form.validate(&state.config.login_domain)?;

    let credential = state.api.login(form.email.trim(), &form.password).await?;

    let onboarded = match state.api.fetch_user(&credential).await {
        Ok(user) => user.is_onboarded(),
        Err(e) => {
            warn!(error = %e, "Could not load profile after login");
            false
        }
    };

    let guard = &state.config.guard;
    let target = if onboarded || !guard.track_onboarding {
        guard.landing_route.as_str()
    } else {
        guard.onboarding_route.as_str()
    };
    info!(onboarded, redirect = %target, "User logged in");

    let jar = jar
        .add(state.cookie(state.auth_cookie_name(), credential.expose()))
        .add(state.cookie(ONBOARDING_COOKIE, if onboarded { "true" } else { "false" }));

    Ok((jar, Redirect::to(target)))
}

/// GET /signup
pub async fn signup_page() -> impl IntoResponse {
    Json(json!({
        "page": "signup",
        "fields": ["email", "password", "first_name", "last_name", "student_id", "university"],
    }))
}

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Redirect, PageError> {
    form.validate()?;

    let user_id = state.api.signup(&NewUser::from(form)).await?;
    info!(user_id, "User signed up");

    Ok(Redirect::to("/login"))
}

/// GET /logout
///
/// Clears both cookies whether or not the backend acknowledged the logout.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    let credential =
        SessionCredential::from_cookie(jar.get(state.auth_cookie_name()).map(|c| c.value()));
    state.api.logout(credential.as_ref()).await;

    let jar = jar
        .remove(state.expired_cookie(state.auth_cookie_name()))
        .remove(state.expired_cookie(ONBOARDING_COOKIE));

    (jar, Redirect::to(&state.config.guard.anonymous_route))
}
