//! Onboarding page: the one-time profile completion step.

use axum::extract::{Extension, State};
use axum::response::{IntoResponse, Redirect};
use axum::{Form, Json};
use axum_extra::extract::CookieJar;
use serde_json::json;
use tracing::info;

use super::{AppState, PageError, credential};
use crate::api::ProfileUpdate;
use crate::config::ONBOARDING_COOKIE;
use crate::forms::OnboardingForm;
use crate::guard::RequestContext;

/// GET /onboarding
///
/// Prefills the form from whatever profile fields the backend already has.
pub async fn onboarding_page(Extension(ctx): Extension<RequestContext>) -> impl IntoResponse {
    let user = ctx.user.unwrap_or_default();
    let prefill = |value: &str| if value == "null" { String::new() } else { value.to_string() };

    Json(json!({
        "page": "onboarding",
        "authenticated": ctx.credential.is_some(),
        "form": {
            "first_name": prefill(&user.first_name),
            "last_name": prefill(&user.last_name),
            "university": prefill(&user.university),
            "student_id": prefill(&user.student_id),
        },
    }))
}

/// POST /onboarding
pub async fn complete_onboarding(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    jar: CookieJar,
    Form(form): Form<OnboardingForm>,
) -> Result<(CookieJar, Redirect), PageError> {
    let credential = credential(&ctx)?;
    form.validate()?;

    state
        .api
        .update_user(credential, &ProfileUpdate::from(form))
        .await?;
    info!("Onboarding completed");

    let jar = jar.add(state.cookie(ONBOARDING_COOKIE, "true"));
    Ok((jar, Redirect::to(&state.config.guard.landing_route)))
}
