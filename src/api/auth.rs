//! Login, logout and signup against the identity endpoints.

use axum_extra::extract::cookie::Cookie;
use reqwest::header::SET_COOKIE;
use serde_json::json;
use tracing::{info, warn};

use super::client::{ApiClient, RequestSpec};
use super::model::NewUser;
use crate::config::DEFAULT_AUTH_COOKIE;
use crate::error::ApiError;
use crate::guard::SessionCredential;

impl ApiClient {
    /// POST /auth/login
    ///
    /// Returns the issued session credential. The token is taken from the
    /// JSON `token` field, or from the `auth_token` cookie the backend sets.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionCredential, ApiError> {
        let path = "/auth/login";
        let response = self
            .send(RequestSpec::post(path).json(json!({ "email": email, "password": password })))
            .await?;

        let from_cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|raw| Cookie::parse(raw.to_string()).ok())
            .find(|cookie| cookie.name() == DEFAULT_AUTH_COOKIE)
            .map(|cookie| cookie.value().to_string());

        let body: serde_json::Value = response.json().await.unwrap_or_default();
        let from_body = body
            .get("token")
            .and_then(|t| t.as_str())
            .map(str::to_string);

        let token = from_body.or(from_cookie);
        match SessionCredential::from_cookie(token.as_deref()) {
            Some(credential) => {
                info!("Login succeeded");
                Ok(credential)
            }
            None => Err(ApiError::Decode {
                path: path.to_string(),
                reason: "login response carried no session token".to_string(),
            }),
        }
    }

    /// GET /auth/logout
    ///
    /// Best effort: failures are logged and swallowed, the local cookies are
    /// cleared regardless.
    pub async fn logout(&self, credential: Option<&SessionCredential>) {
        if credential.is_none() {
            return;
        }
        if let Err(e) = self
            .send(RequestSpec::get("/auth/logout").authorized(credential))
            .await
        {
            warn!(error = %e, "Backend logout failed");
        }
    }

    /// POST /auth/signup
    ///
    /// Returns the id of the created user.
    pub async fn signup(&self, user: &NewUser) -> Result<i64, ApiError> {
        let path = "/auth/signup";
        let body = serde_json::to_value(user).map_err(|e| ApiError::Decode {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        let created: serde_json::Value = self.send_json(RequestSpec::post(path).json(body)).await?;

        created
            .get("user_id")
            .and_then(|id| id.as_i64())
            .ok_or_else(|| ApiError::Decode {
                path: path.to_string(),
                reason: "missing user_id".to_string(),
            })
    }
}
