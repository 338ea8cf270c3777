//! Jira API client implementation.
//!
//! This module provides the main client for interacting with the Jira REST
//! API v3. It handles authentication, request/response processing, and error
//! mapping for the three operations bugdrop needs: listing projects,
//! creating issues, and uploading attachments.

use std::time::Duration;

use reqwest::{header, multipart, Client, Response, StatusCode};
use tracing::{debug, instrument, warn};

use super::auth::Auth;
use super::error::{ApiError, Result};
use super::types::{CreateIssueRequest, CreatedIssue, IssueDraft, Project, ProjectSearchResponse};
use crate::config::Settings;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Page size for the project search endpoint.
const MAX_PROJECT_RESULTS: u32 = 50;

/// The Jira API client.
///
/// Provides async methods for the Jira REST API v3. Each operation is a
/// single attempt: there is no retry or backoff at this layer, and a
/// failure is surfaced immediately as a typed [`ApiError`].
///
/// The client is cheap to clone - the underlying HTTP connection pool is
/// shared - and internally immutable, so clones can run concurrently.
#[derive(Debug, Clone)]
pub struct JiraClient {
    /// The HTTP client.
    client: Client,
    /// The base URL for the Jira instance.
    base_url: String,
    /// Authentication credentials.
    auth: Auth,
}

impl JiraClient {
    /// Create a client from saved settings, pulling the API token from the
    /// OS keyring.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotConfigured` before attempting any network I/O
    /// if the settings hold no email, and a keyring error if no token is
    /// stored for the account.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        if settings.email.is_empty() {
            return Err(ApiError::NotConfigured);
        }

        let auth = Auth::from_keyring(&settings.email)?;
        let client = Self::build_http_client()?;
        let base_url = normalize_base_url(&settings.url);

        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    /// Create a client with explicit credentials.
    ///
    /// Use this for testing or when credentials are provided directly.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotConfigured` if the email or token is empty.
    pub fn with_credentials(base_url: &str, email: &str, token: &str) -> Result<Self> {
        let auth = Auth::new(email, token)?;
        let client = Self::build_http_client()?;
        let base_url = normalize_base_url(base_url);

        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    /// Build the HTTP client with appropriate settings.
    fn build_http_client() -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(ApiError::Network)
    }

    /// List the projects visible to the authenticated user.
    ///
    /// Calls `GET /rest/api/3/project/search` and returns the `values`
    /// array in server order.
    #[instrument(skip(self))]
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let url = format!(
            "{}/rest/api/3/project/search?maxResults={}",
            self.base_url, MAX_PROJECT_RESULTS
        );

        let response: ProjectSearchResponse = self.get(&url).await?;
        debug!("Fetched {} projects", response.values.len());
        Ok(response.values)
    }

    /// Create an issue from a draft.
    ///
    /// The draft names its project by key, but the create endpoint wants
    /// the opaque project ID, so the project list is fetched first and the
    /// key resolved against it. The list is re-fetched on every call rather
    /// than cached; the extra round trip keeps resolution correct when the
    /// server's project set changes between calls.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ProjectNotFound` without issuing the create
    /// request if the key does not match any visible project.
    #[instrument(skip(self), fields(project_key = %draft.project_key))]
    pub async fn create_issue(&self, draft: &IssueDraft) -> Result<CreatedIssue> {
        let projects = self.list_projects().await?;
        let project_id = projects
            .iter()
            .find(|p| p.key == draft.project_key)
            .map(|p| p.id.clone())
            .ok_or_else(|| ApiError::ProjectNotFound(draft.project_key.clone()))?;

        debug!(project_id = %project_id, "Resolved project key");

        let request = CreateIssueRequest::from_draft(draft, &project_id);
        let url = format!("{}/rest/api/3/issue", self.base_url);

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, self.auth.header_value())
            .header(header::ACCEPT, "application/json")
            .json(&request)
            .send()
            .await?;

        let created: CreatedIssue = self.handle_response(response).await?;
        debug!(issue_key = %created.key, "Issue created");
        Ok(created)
    }

    /// Upload a file as an attachment to an issue.
    ///
    /// Sends a multipart form with a single part named `file` to
    /// `POST /rest/api/3/issue/{issueKey}/attachments`. The
    /// `X-Atlassian-Token: no-check` header is required by the endpoint to
    /// bypass its XSRF protection.
    #[instrument(skip(self, bytes), fields(issue_key = %issue_key, file_name = %file_name, size = bytes.len()))]
    pub async fn add_attachment(
        &self,
        issue_key: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<()> {
        let url = format!(
            "{}/rest/api/3/issue/{}/attachments",
            self.base_url, issue_key
        );

        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, self.auth.header_value())
            .header("X-Atlassian-Token", "no-check")
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!("Attachment uploaded");
            return Ok(());
        }

        let error_body = response.text().await.unwrap_or_default();
        debug!("Error response body: {}", error_body);

        Err(match status {
            StatusCode::NOT_FOUND => {
                ApiError::NotFound(format!("issue '{}' not found", issue_key))
            }
            _ => Self::error_from_response(status, &url, &error_body),
        })
    }

    /// Perform a GET request with authentication and error handling.
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, self.auth.header_value())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle the HTTP response, checking for errors and parsing JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
        } else {
            // Try to get error details from response body
            let error_body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", error_body);

            Err(Self::error_from_response(status, &url, &error_body))
        }
    }

    /// Create an appropriate error from an HTTP response.
    fn error_from_response(status: StatusCode, url: &str, body: &str) -> ApiError {
        // Try to extract a Jira error message from the response
        let context = if body.is_empty() {
            url.to_string()
        } else {
            // Jira often returns JSON with errorMessages
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
                if let Some(messages) = json.get("errorMessages") {
                    if let Some(arr) = messages.as_array() {
                        if !arr.is_empty() {
                            return ApiError::from_status(
                                status,
                                &arr.iter()
                                    .filter_map(|v| v.as_str())
                                    .collect::<Vec<_>>()
                                    .join(", "),
                            );
                        }
                    }
                }
                if let Some(errors) = json.get("errors") {
                    if let Some(obj) = errors.as_object() {
                        let error_strings: Vec<String> = obj
                            .iter()
                            .map(|(k, v)| format!("{}: {}", k, v))
                            .collect();
                        if !error_strings.is_empty() {
                            return ApiError::from_status(status, &error_strings.join(", "));
                        }
                    }
                }
            }
            url.to_string()
        };

        ApiError::from_status(status, &context)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Normalize the base URL by removing trailing slashes and ensuring HTTPS.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    // Warn if not HTTPS (but don't enforce for localhost/testing)
    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}. This is insecure for production use.", url);
    }

    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> JiraClient {
        JiraClient::with_credentials(base_url, "test@example.com", "test_token").unwrap()
    }

    fn expected_auth_header() -> String {
        format!("Basic {}", BASE64.encode("test@example.com:test_token"))
    }

    #[test]
    fn test_normalize_base_url_removes_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://company.atlassian.net/"),
            "https://company.atlassian.net"
        );
    }

    #[test]
    fn test_normalize_base_url_handles_multiple_slashes() {
        assert_eq!(
            normalize_base_url("https://company.atlassian.net///"),
            "https://company.atlassian.net"
        );
    }

    #[test]
    fn test_normalize_base_url_preserves_path() {
        assert_eq!(
            normalize_base_url("https://company.atlassian.net/jira/"),
            "https://company.atlassian.net/jira"
        );
    }

    #[test]
    fn test_client_requires_credentials() {
        let result = JiraClient::with_credentials("https://example.atlassian.net", "", "token");
        assert!(matches!(result, Err(ApiError::NotConfigured)));

        let result =
            JiraClient::with_credentials("https://example.atlassian.net", "a@b.com", "");
        assert!(matches!(result, Err(ApiError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_list_projects_preserves_server_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/3/project/search"))
            .and(header("Authorization", expected_auth_header().as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "values": [
                    {"id": "10002", "key": "ZZZ", "name": "Last alphabetically"},
                    {"id": "10001", "key": "ABC", "name": "First alphabetically"}
                ]
            })))
            .mount(&server)
            .await;

        let projects = test_client(&server.uri()).list_projects().await.unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].key, "ZZZ");
        assert_eq!(projects[1].key, "ABC");
    }

    #[tokio::test]
    async fn test_list_projects_unauthorized() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/3/project/search"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = test_client(&server.uri()).list_projects().await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_list_projects_forbidden() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/3/project/search"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let result = test_client(&server.uri()).list_projects().await;
        assert!(matches!(result, Err(ApiError::Forbidden)));
    }

    #[tokio::test]
    async fn test_list_projects_malformed_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/3/project/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = test_client(&server.uri()).list_projects().await;
        assert!(matches!(result, Err(ApiError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_create_issue_posts_resolved_project_id() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/3/project/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "values": [{"id": "10001", "key": "ABC", "name": "Alpha"}]
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/rest/api/3/issue"))
            .and(body_partial_json(json!({
                "fields": {
                    "project": {"id": "10001"},
                    "summary": "Crash on launch",
                    "issuetype": {"name": "Bug"}
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "10100",
                "key": "ABC-123",
                "self": format!("{}/rest/api/3/issue/10100", server.uri())
            })))
            .expect(1)
            .mount(&server)
            .await;

        let draft = IssueDraft::bug("ABC", "Crash on launch");
        let created = test_client(&server.uri()).create_issue(&draft).await.unwrap();
        assert_eq!(created.key, "ABC-123");
        assert_eq!(created.id, "10100");
    }

    #[tokio::test]
    async fn test_create_issue_unknown_project_never_posts() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/3/project/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "values": [{"id": "10001", "key": "ABC", "name": "Alpha"}]
            })))
            .mount(&server)
            .await;

        // The create endpoint must never be hit
        Mock::given(method("POST"))
            .and(path("/rest/api/3/issue"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let draft = IssueDraft::bug("NOPE", "title");
        let result = test_client(&server.uri()).create_issue(&draft).await;
        match result {
            Err(ApiError::ProjectNotFound(key)) => assert_eq!(key, "NOPE"),
            other => panic!("Expected ProjectNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_issue_project_key_match_is_case_sensitive() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/3/project/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "values": [{"id": "10001", "key": "ABC", "name": "Alpha"}]
            })))
            .mount(&server)
            .await;

        let draft = IssueDraft::bug("abc", "title");
        let result = test_client(&server.uri()).create_issue(&draft).await;
        assert!(matches!(result, Err(ApiError::ProjectNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_issue_auth_failure_short_circuits() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/3/project/search"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/rest/api/3/issue"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        // The 401 from project resolution surfaces as the same kind a direct
        // call would produce; creation is never attempted.
        let draft = IssueDraft::bug("ABC", "title");
        let result = test_client(&server.uri()).create_issue(&draft).await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_create_issue_invalid_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/3/project/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "values": [{"id": "10001", "key": "ABC", "name": "Alpha"}]
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/rest/api/3/issue"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "errorMessages": [],
                "errors": {"summary": "Summary must be less than 255 characters."}
            })))
            .mount(&server)
            .await;

        let draft = IssueDraft::bug("ABC", "x".repeat(300));
        let result = test_client(&server.uri()).create_issue(&draft).await;
        match result {
            Err(ApiError::InvalidRequest(msg)) => assert!(msg.contains("summary")),
            other => panic!("Expected InvalidRequest, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_attachment_sends_no_check_header() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/3/issue/ABC-123/attachments"))
            .and(header("X-Atlassian-Token", "no-check"))
            .and(header("Authorization", expected_auth_header().as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": "20000",
                "filename": "crash.png",
                "size": 4
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let result = test_client(&server.uri())
            .add_attachment("ABC-123", "crash.png", vec![1, 2, 3, 4])
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_add_attachment_issue_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/3/issue/GONE-1/attachments"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = test_client(&server.uri())
            .add_attachment("GONE-1", "crash.png", vec![1])
            .await;
        match result {
            Err(ApiError::NotFound(msg)) => assert!(msg.contains("GONE-1")),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_attachment_payload_too_large() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/3/issue/ABC-123/attachments"))
            .respond_with(ResponseTemplate::new(413))
            .mount(&server)
            .await;

        let result = test_client(&server.uri())
            .add_attachment("ABC-123", "big.mp4", vec![0; 1024])
            .await;
        assert!(matches!(result, Err(ApiError::PayloadTooLarge)));
    }
}
