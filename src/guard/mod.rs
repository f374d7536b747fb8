//! Request authorization guard.
//!
//! Runs before every route handler. It reads the session credential and the
//! onboarding flag from cookies, derives a [`GuardState`], and either lets the
//! request through or answers with a 303 redirect. Allowed requests carry a
//! [`RequestContext`] extension with the normalized credential and, when the
//! user service answered, the user's profile.

pub mod middleware;
pub mod policy;
pub mod routes;
pub mod session;

use async_trait::async_trait;

use crate::api::UserProfile;
use crate::error::ApiError;

pub use middleware::{GuardLayerState, RequestContext, guard_middleware};
pub use policy::{Decision, GuardPolicy, GuardState, RedirectReason};
pub use routes::{RouteClassification, RouteKind};
pub use session::{OnboardingStatus, SessionCredential, is_no_session};

/// Resolves a session credential to a user profile.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn lookup(&self, credential: &SessionCredential) -> Result<UserProfile, ApiError>;
}
