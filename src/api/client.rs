//! HTTP client for the backend API.
//!
//! Every backend call goes through [`ApiClient::send`], parameterized by a
//! [`RequestSpec`]. The typed wrappers in the sibling modules only decide
//! path, method, body and whether a credential is required.

use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::guard::SessionCredential;

/// Description of one backend request.
#[derive(Debug)]
pub struct RequestSpec<'a> {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
    pub credential: Option<&'a SessionCredential>,
    pub auth_required: bool,
}

impl<'a> RequestSpec<'a> {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            credential: None,
            auth_required: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Attach a JSON body.
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Require a bearer credential. A missing one fails before anything is sent.
    pub fn authorized(mut self, credential: Option<&'a SessionCredential>) -> Self {
        self.credential = credential;
        self.auth_required = true;
        self
    }
}

/// Client for the backend REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the raw response if it was a 2xx.
    pub async fn send(&self, spec: RequestSpec<'_>) -> Result<reqwest::Response, ApiError> {
        let RequestSpec {
            method,
            path,
            body,
            credential,
            auth_required,
        } = spec;

        if auth_required && credential.is_none() {
            return Err(ApiError::MissingCredential { path });
        }

        debug!(%method, path = %path, "Backend request");

        let mut request = self.client.request(method, self.url(&path));
        if let Some(credential) = credential {
            request = request.bearer_auth(credential.expose());
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| ApiError::Network {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let raw = response.text().await.unwrap_or_default();
        let message = error_message(&raw).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });
        warn!(path = %path, status = %status, message = %message, "Backend request failed");

        Err(ApiError::Status {
            path,
            status,
            message,
        })
    }

    /// Send a request and decode the JSON response body.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        spec: RequestSpec<'_>,
    ) -> Result<T, ApiError> {
        let path = spec.path.clone();
        let response = self.send(spec).await?;
        response.json::<T>().await.map_err(|e| ApiError::Decode {
            path,
            reason: e.to_string(),
        })
    }
}

/// Pull the `message` field out of a backend error body.
fn error_message(raw: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_reads_message_field() {
        assert_eq!(
            error_message(r#"{"message": "User already exists with email"}"#).as_deref(),
            Some("User already exists with email")
        );
        assert_eq!(error_message("<html>oops</html>"), None);
        assert_eq!(error_message(r#"{"status": "fail"}"#), None);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8000/api/");
        assert_eq!(client.url("/users"), "http://localhost:8000/api/users");
    }

    #[tokio::test]
    async fn authorized_request_without_credential_is_rejected_locally() {
        // Port 9 (discard) is never contacted: the check happens first.
        let client = ApiClient::new("http://127.0.0.1:9");
        let err = client
            .send(RequestSpec::get("/users").authorized(None))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingCredential { path } if path == "/users"));
    }

    #[test]
    fn spec_builder_sets_fields() {
        let credential = SessionCredential::from_cookie(Some("tok")).unwrap();
        let spec = RequestSpec::post("/conversations")
            .json(serde_json::json!({"title": "Untitled"}))
            .authorized(Some(&credential));
        assert_eq!(spec.method, Method::POST);
        assert!(spec.auth_required);
        assert_eq!(spec.body.unwrap()["title"], "Untitled");
    }
}
