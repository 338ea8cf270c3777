//! API error types for the Jira client.

use thiserror::Error;

/// Errors that can occur when interacting with the Jira API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No client has been set up yet - the connection was never configured.
    #[error("Jira connection is not set up: run setup first")]
    NotInitialized,

    /// Credentials are incomplete - email or API token is missing.
    #[error("Jira credentials are incomplete: email and API token are required")]
    NotConfigured,

    /// Authentication failed - invalid email or API token.
    #[error("Authentication failed: check your email and API token")]
    Unauthorized,

    /// Permission denied - user lacks access to the resource.
    #[error("Permission denied: you don't have access to this resource")]
    Forbidden,

    /// The requested project key does not exist on the server.
    #[error("Project '{0}' not found")]
    ProjectNotFound(String),

    /// The server rejected the request payload.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The attachment exceeded the server-side size limit.
    #[error("File is too large for the server: attachments are typically capped at 20MB")]
    PayloadTooLarge,

    /// Jira returned an unexpected status code.
    #[error("Jira server error: {0}")]
    ServerError(String),

    /// Network or HTTP error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid response from the API.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Keyring error when storing/retrieving tokens.
    #[error("Keyring error: {0}")]
    Keyring(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an appropriate error from an HTTP status code.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status.as_u16() {
            400 => ApiError::InvalidRequest(context.to_string()),
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound(context.to_string()),
            413 => ApiError::PayloadTooLarge,
            _ => ApiError::ServerError(format!("HTTP {}: {}", status, context)),
        }
    }
}
