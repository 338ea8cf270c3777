//! Centralized error types for bugdrop.
//!
//! This module provides a unified error hierarchy for the application with
//! user-friendly error messages. All error types use `thiserror` for
//! ergonomic error handling. The human-readable wording lives here, at the
//! presentation boundary - the core modules only produce typed kinds.

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;
use crate::workflow::{WorkflowError, WorkflowStage};

/// The main application error type.
///
/// Aggregates all error types that can occur in bugdrop, providing
/// user-friendly error messages while preserving the underlying error
/// context for debugging.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Workflow failures, tagged with the failing stage.
    #[error("{0}")]
    Workflow(#[from] WorkflowError),

    /// IO errors (file system, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display.
    ///
    /// Every error kind maps to a distinct message, without technical
    /// jargon or stack traces.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::Missing => {
                    "Bugdrop is not configured yet. Run 'bugdrop setup' first.".to_string()
                }
                ConfigError::CreateDirError(_) => {
                    "Could not create configuration directory. Check file permissions.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file exists and is readable.".to_string()
                }
                ConfigError::WriteError(_) => {
                    "Could not save configuration. Please check file permissions.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::SerializeError(_) => {
                    "Could not save configuration. Internal error.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => api_user_message(e),
            AppError::Workflow(e) => {
                let inner = api_user_message(&e.source);
                match e.stage {
                    WorkflowStage::CreateIssue => {
                        format!("Could not create the issue. {}", inner)
                    }
                    WorkflowStage::AddAttachment => {
                        format!("Could not add the attachment. {}", inner)
                    }
                }
            }
            AppError::Io(_) => "A file operation failed. Please check the path and permissions.".to_string(),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        let api_error = match self {
            AppError::Config(ConfigError::Missing) => {
                return Some("Run 'bugdrop setup --url <URL> --email <EMAIL> --token <TOKEN>'.")
            }
            AppError::Api(e) => e,
            AppError::Workflow(e) => &e.source,
            _ => return None,
        };

        match api_error {
            ApiError::NotInitialized | ApiError::NotConfigured => {
                Some("Run 'bugdrop setup' to configure your Jira connection.")
            }
            ApiError::Unauthorized => {
                Some("Check your API token at https://id.atlassian.com/manage-profile/security/api-tokens")
            }
            ApiError::Network(_) => Some("Check your internet connection and Jira URL."),
            ApiError::PayloadTooLarge => {
                Some("Try a smaller file, or ask your Jira admin about the attachment size limit.")
            }
            _ => None,
        }
    }
}

/// Map an API error to its user-facing wording.
fn api_user_message(e: &ApiError) -> String {
    match e {
        ApiError::NotInitialized => {
            "No Jira connection is set up yet. Run 'bugdrop setup' first.".to_string()
        }
        ApiError::NotConfigured => {
            "Your Jira credentials are incomplete. Please provide both an email and an API token."
                .to_string()
        }
        ApiError::Unauthorized => {
            "Authentication failed. Please check your email and API token.".to_string()
        }
        ApiError::Forbidden => {
            "Access denied. You don't have permission to access this resource.".to_string()
        }
        ApiError::ProjectNotFound(key) => format!(
            "Project '{}' was not found. Try selecting a different project.",
            key
        ),
        ApiError::InvalidRequest(_) => {
            "Jira rejected the request. Check the issue summary and selected project.".to_string()
        }
        ApiError::NotFound(resource) => {
            format!("'{}' was not found. Check the issue key and your project access.", resource)
        }
        ApiError::PayloadTooLarge => {
            "The file is too large for the server. Attachments are typically capped at 20MB."
                .to_string()
        }
        ApiError::ServerError(_) => "Jira server error. Please try again later.".to_string(),
        ApiError::Network(_) => {
            "Connection failed. Please check your internet connection.".to_string()
        }
        ApiError::InvalidResponse(_) => {
            "Unexpected response from Jira. Please try again.".to_string()
        }
        ApiError::Keyring(_) => {
            "Could not access secure storage. Please run 'bugdrop setup' again.".to_string()
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
