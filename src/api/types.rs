//! Jira API request and response types.
//!
//! These types model the REST API v3 payloads for project search, issue
//! creation, and the Atlassian Document Format used for descriptions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Jira project.
///
/// Returned in the `values` array of `GET /rest/api/3/project/search`.
/// The `key` is the human-facing short code (e.g. "ABC"); the `id` is the
/// opaque identifier that issue creation requests require.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    /// The opaque project ID.
    pub id: String,
    /// The project key (e.g., "ABC").
    pub key: String,
    /// The project display name.
    pub name: String,
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.name)
    }
}

/// Response from the project search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSearchResponse {
    /// The matching projects, in server order.
    #[serde(default)]
    pub values: Vec<Project>,
}

/// A newly created issue.
///
/// Returned by `POST /rest/api/3/issue`. The `key` is what subsequent
/// attachment calls require.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedIssue {
    /// The issue ID.
    pub id: String,
    /// The issue key (e.g., "ABC-123").
    pub key: String,
    /// URL of the created issue resource.
    #[serde(rename = "self")]
    pub self_url: String,
}

/// The fields of an issue about to be created.
///
/// Transient - built per create call, consumed by [`CreateIssueRequest`].
#[derive(Debug, Clone)]
pub struct IssueDraft {
    /// Key of the project the issue belongs to.
    pub project_key: String,
    /// One-line issue summary. Must be non-empty.
    pub summary: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Issue type name, "Bug" unless overridden.
    pub issue_type: String,
}

impl IssueDraft {
    /// Create a draft for a new bug.
    pub fn bug(project_key: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            project_key: project_key.into(),
            summary: summary.into(),
            description: None,
            issue_type: "Bug".to_string(),
        }
    }

    /// Attach a description to the draft.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request body for `POST /rest/api/3/issue`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateIssueRequest {
    pub fields: NewIssueFields,
}

impl CreateIssueRequest {
    /// Build the request body from a draft and the resolved project ID.
    ///
    /// The project is referenced by ID, not key - the server rejects keys
    /// here. A description, if present, is wrapped in a single-paragraph
    /// Atlassian document.
    pub fn from_draft(draft: &IssueDraft, project_id: &str) -> Self {
        Self {
            fields: NewIssueFields {
                project: ProjectId {
                    id: project_id.to_string(),
                },
                summary: draft.summary.clone(),
                description: draft.description.as_deref().map(AtlassianDoc::paragraph),
                issuetype: IssueType {
                    name: draft.issue_type.clone(),
                },
            },
        }
    }
}

/// Fields payload of an issue creation request.
#[derive(Debug, Clone, Serialize)]
pub struct NewIssueFields {
    pub project: ProjectId,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<AtlassianDoc>,
    pub issuetype: IssueType,
}

/// A project reference by opaque ID.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectId {
    pub id: String,
}

/// An issue type reference by name.
#[derive(Debug, Clone, Serialize)]
pub struct IssueType {
    pub name: String,
}

/// A rich-text document in Atlassian Document Format.
///
/// Issue descriptions in API v3 must be ADF documents, not plain strings.
#[derive(Debug, Clone, Serialize)]
pub struct AtlassianDoc {
    pub version: u32,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub content: Vec<ContentNode>,
}

impl AtlassianDoc {
    /// Wrap plain text in a version-1 document containing one paragraph
    /// with one text node.
    pub fn paragraph(text: &str) -> Self {
        Self {
            version: 1,
            doc_type: "doc".to_string(),
            content: vec![ContentNode {
                node_type: "paragraph".to_string(),
                content: vec![TextNode {
                    node_type: "text".to_string(),
                    text: text.to_string(),
                }],
            }],
        }
    }
}

/// A block-level node within an Atlassian document.
#[derive(Debug, Clone, Serialize)]
pub struct ContentNode {
    #[serde(rename = "type")]
    pub node_type: String,
    pub content: Vec<TextNode>,
}

/// An inline text node within an Atlassian document.
#[derive(Debug, Clone, Serialize)]
pub struct TextNode {
    #[serde(rename = "type")]
    pub node_type: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_deserialization() {
        let json = r#"{"values": [
            {"id": "10001", "key": "ABC", "name": "Alpha"},
            {"id": "10002", "key": "XYZ", "name": "Zulu"}
        ]}"#;

        let response: ProjectSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.values.len(), 2);
        // Server order is preserved, not re-sorted
        assert_eq!(response.values[0].key, "ABC");
        assert_eq!(response.values[1].key, "XYZ");
    }

    #[test]
    fn test_project_search_response_missing_values() {
        let response: ProjectSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.values.is_empty());
    }

    #[test]
    fn test_created_issue_self_field_rename() {
        let json = r#"{
            "id": "10100",
            "key": "ABC-123",
            "self": "https://example.atlassian.net/rest/api/3/issue/10100"
        }"#;

        let issue: CreatedIssue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.key, "ABC-123");
        assert!(issue.self_url.ends_with("/issue/10100"));
    }

    #[test]
    fn test_create_request_references_project_by_id() {
        let draft = IssueDraft::bug("ABC", "Crash on launch");
        let request = CreateIssueRequest::from_draft(&draft, "10001");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["fields"]["project"]["id"], "10001");
        assert_eq!(json["fields"]["summary"], "Crash on launch");
        assert_eq!(json["fields"]["issuetype"]["name"], "Bug");
        // No description key at all when the draft has none
        assert!(json["fields"].get("description").is_none());
    }

    #[test]
    fn test_description_wrapped_in_single_paragraph_doc() {
        let draft = IssueDraft::bug("ABC", "Crash on launch")
            .with_description("Screenshot: crash.png");
        let request = CreateIssueRequest::from_draft(&draft, "10001");

        let json = serde_json::to_value(&request).unwrap();
        let doc = &json["fields"]["description"];
        assert_eq!(doc["version"], 1);
        assert_eq!(doc["type"], "doc");
        assert_eq!(doc["content"].as_array().unwrap().len(), 1);
        assert_eq!(doc["content"][0]["type"], "paragraph");
        assert_eq!(doc["content"][0]["content"][0]["type"], "text");
        assert_eq!(doc["content"][0]["content"][0]["text"], "Screenshot: crash.png");
    }

    #[test]
    fn test_issue_draft_default_type_is_bug() {
        let draft = IssueDraft::bug("ABC", "title");
        assert_eq!(draft.issue_type, "Bug");
        assert!(draft.description.is_none());
    }

    #[test]
    fn test_project_display() {
        let project = Project {
            id: "10001".to_string(),
            key: "ABC".to_string(),
            name: "Alpha".to_string(),
        };
        assert_eq!(project.to_string(), "ABC: Alpha");
    }
}
