//! Authentication handling for the Jira API.
//!
//! This module handles authentication with Jira using Basic Auth
//! (email + API token) and secure token storage via the OS keyring.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use super::error::{ApiError, Result};

/// The keyring service name for bugdrop tokens.
const KEYRING_SERVICE: &str = "bugdrop";

/// Authentication credentials for Jira.
#[derive(Debug, Clone)]
pub struct Auth {
    /// The user's email address.
    email: String,
    /// The Base64-encoded authorization header value.
    auth_header: String,
}

impl Auth {
    /// Create new authentication credentials from email and token.
    ///
    /// The token is immediately encoded and the raw token is not stored.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotConfigured` if the email or token is empty -
    /// remote calls must never be attempted with incomplete credentials.
    pub fn new(email: &str, token: &str) -> Result<Self> {
        if email.is_empty() || token.is_empty() {
            return Err(ApiError::NotConfigured);
        }

        let auth_header = build_auth_header(email, token);
        Ok(Self {
            email: email.to_string(),
            auth_header,
        })
    }

    /// Create authentication for an account using the OS keyring.
    ///
    /// Retrieves the API token stored for the given email.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be retrieved from the keyring
    /// or the credentials are incomplete.
    pub fn from_keyring(email: &str) -> Result<Self> {
        let token = get_token(email)?;
        Self::new(email, &token)
    }

    /// Get the authorization header value for HTTP requests.
    ///
    /// Returns the complete "Basic ..." header value.
    pub fn header_value(&self) -> &str {
        &self.auth_header
    }

    /// Get the email address.
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Build the Basic Auth header value.
///
/// Encodes "email:token" in Base64 and prepends "Basic ".
fn build_auth_header(email: &str, token: &str) -> String {
    let credentials = format!("{}:{}", email, token);
    let encoded = BASE64.encode(credentials.as_bytes());
    format!("Basic {}", encoded)
}

/// Store an API token in the OS keyring.
///
/// # Errors
///
/// Returns an error if the token cannot be stored in the keyring.
pub fn store_token(email: &str, token: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, email)
        .map_err(|e| ApiError::Keyring(format!("failed to create keyring entry: {}", e)))?;

    entry
        .set_password(token)
        .map_err(|e| ApiError::Keyring(format!("failed to store token: {}", e)))?;

    Ok(())
}

/// Retrieve an API token from the OS keyring.
///
/// # Errors
///
/// Returns an error if the token cannot be retrieved from the keyring.
pub fn get_token(email: &str) -> Result<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, email)
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))?;

    entry
        .get_password()
        .map_err(|e| ApiError::Keyring(format!("failed to retrieve token: {}", e)))
}

/// Delete an API token from the OS keyring.
///
/// # Errors
///
/// Returns an error if the token cannot be deleted from the keyring.
pub fn delete_token(email: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, email)
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))?;

    entry
        .delete_password()
        .map_err(|e| ApiError::Keyring(format!("failed to delete token: {}", e)))?;

    Ok(())
}

/// Check if a token exists in the OS keyring for an account.
pub fn has_token(email: &str) -> bool {
    get_token(email).is_ok()
}
