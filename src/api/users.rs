//! User profile endpoints.

use async_trait::async_trait;
use serde_json::json;

use super::client::{ApiClient, RequestSpec};
use super::model::{ProfileUpdate, UserEnvelope, UserProfile};
use crate::error::ApiError;
use crate::guard::{SessionCredential, UserDirectory};

impl ApiClient {
    /// GET /users
    pub async fn fetch_user(&self, credential: &SessionCredential) -> Result<UserProfile, ApiError> {
        let envelope: UserEnvelope = self
            .send_json(RequestSpec::get("/users").authorized(Some(credential)))
            .await?;
        Ok(envelope.user)
    }

    /// PUT /users
    ///
    /// Stores the onboarding fields on the user's profile.
    pub async fn update_user(
        &self,
        credential: &SessionCredential,
        update: &ProfileUpdate,
    ) -> Result<(), ApiError> {
        let body = json!({
            "first_name": update.first_name,
            "last_name": update.last_name,
            "university": update.university,
            "student_id": update.student_id,
        });
        self.send(RequestSpec::put("/users").json(body).authorized(Some(credential)))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for ApiClient {
    async fn lookup(&self, credential: &SessionCredential) -> Result<UserProfile, ApiError> {
        self.fetch_user(credential).await
    }
}
