//! Error types for the chat portal.

use reqwest::StatusCode;

/// Top-level error type for the portal.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors. All of these abort startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Route {path} must start with '/'")]
    RelativeRoute { path: String },

    #[error("Onboarding route {path} is also listed as a public route")]
    OnboardingIsPublic { path: String },
}

/// Errors from calls to the backend API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request to {path} requires a session credential")]
    MissingCredential { path: String },

    #[error("Request to {path} failed: {reason}")]
    Network { path: String, reason: String },

    #[error("Backend returned {status} for {path}: {message}")]
    Status {
        path: String,
        status: StatusCode,
        message: String,
    },

    #[error("Invalid response from {path}: {reason}")]
    Decode { path: String, reason: String },
}

impl ApiError {
    /// HTTP status to report to the browser when a form action fails.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingCredential { .. } => StatusCode::UNAUTHORIZED,
            Self::Status { status, .. } => *status,
            Self::Network { .. } | Self::Decode { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// Message suitable for showing next to a form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            Self::MissingCredential { .. } => "Not logged in".to_string(),
            Self::Network { .. } | Self::Decode { .. } => {
                "Unable to reach the server, please try again".to_string()
            }
        }
    }
}

/// Result type alias for the portal.
pub type Result<T> = std::result::Result<T, Error>;
