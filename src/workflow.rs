//! The two user-facing workflows: create-and-attach, and attach-to-existing.
//!
//! Composes the API client into the sequences the frontend triggers. The
//! create-and-attach flow owns the partial-failure semantics: issue creation
//! is irreversible from this layer, so a failed attachment after a
//! successful create surfaces as a distinct partial outcome rather than a
//! plain failure.

use std::fmt;

use thiserror::Error;
use tracing::{instrument, warn};

use crate::api::error::ApiError;
use crate::api::types::IssueDraft;
use crate::api::JiraClient;

/// The workflow step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStage {
    CreateIssue,
    AddAttachment,
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            WorkflowStage::CreateIssue => "creating the issue",
            WorkflowStage::AddAttachment => "adding the attachment",
        };
        f.write_str(stage)
    }
}

/// A workflow failure, tagged with the stage it occurred in.
///
/// Only produced when no remote side effect survives: a create-stage
/// failure means no issue exists, and an attach-stage failure against an
/// existing issue leaves that issue as it was.
#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct WorkflowError {
    /// The stage that failed.
    pub stage: WorkflowStage,
    /// The underlying API error.
    #[source]
    pub source: ApiError,
}

/// Result of a completed workflow run.
///
/// `CreatedAttachmentFailed` is the partial-success case: the issue exists
/// and is not rolled back, but the file never reached it. Callers must
/// render it differently from both full success and failure, since the
/// remediation differs (retry just the attachment vs. the whole flow).
#[derive(Debug)]
pub enum WorkflowOutcome {
    /// Issue created and the file attached to it.
    Created { issue_key: String },
    /// Issue created, but the attachment upload failed.
    CreatedAttachmentFailed {
        issue_key: String,
        attachment_error: ApiError,
    },
    /// File attached to an already existing issue.
    Attached { issue_key: String },
}

impl WorkflowOutcome {
    /// The key of the issue the workflow touched.
    pub fn issue_key(&self) -> &str {
        match self {
            WorkflowOutcome::Created { issue_key }
            | WorkflowOutcome::CreatedAttachmentFailed { issue_key, .. }
            | WorkflowOutcome::Attached { issue_key } => issue_key,
        }
    }

    /// Whether the run ended in partial success.
    pub fn is_partial(&self) -> bool {
        matches!(self, WorkflowOutcome::CreatedAttachmentFailed { .. })
    }

    /// A user-facing summary of the outcome.
    pub fn user_message(&self) -> String {
        match self {
            WorkflowOutcome::Created { issue_key } => {
                format!("Issue {} created with attachment", issue_key)
            }
            WorkflowOutcome::CreatedAttachmentFailed {
                issue_key,
                attachment_error,
            } => format!(
                "Issue {} created, but the attachment failed: {}",
                issue_key, attachment_error
            ),
            WorkflowOutcome::Attached { issue_key } => {
                format!("Attachment added to {}", issue_key)
            }
        }
    }
}

/// Runs the attachment workflows against a borrowed client.
///
/// Stateless - each call is an independent sequential run. Callers are
/// expected to have validated the file (see [`crate::validate`]) before
/// invoking a workflow; no re-validation happens here.
pub struct IssueSubmitter<'a> {
    client: &'a JiraClient,
}

impl<'a> IssueSubmitter<'a> {
    pub fn new(client: &'a JiraClient) -> Self {
        Self { client }
    }

    /// Create an issue from the draft, then attach the file to it.
    ///
    /// If creation fails, no attachment is attempted and the error carries
    /// the `CreateIssue` stage. If creation succeeds but the upload fails,
    /// the run still completes with `CreatedAttachmentFailed` - the issue
    /// is left in place for a later `attach_to_issue` retry.
    #[instrument(skip(self, bytes), fields(project_key = %draft.project_key, file_name = %file_name))]
    pub async fn create_issue_and_attach(
        &self,
        draft: &IssueDraft,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<WorkflowOutcome, WorkflowError> {
        let created = self
            .client
            .create_issue(draft)
            .await
            .map_err(|source| WorkflowError {
                stage: WorkflowStage::CreateIssue,
                source,
            })?;

        match self
            .client
            .add_attachment(&created.key, file_name, bytes)
            .await
        {
            Ok(()) => Ok(WorkflowOutcome::Created {
                issue_key: created.key,
            }),
            Err(attachment_error) => {
                warn!(issue_key = %created.key, error = %attachment_error,
                    "Issue created but attachment failed");
                Ok(WorkflowOutcome::CreatedAttachmentFailed {
                    issue_key: created.key,
                    attachment_error,
                })
            }
        }
    }

    /// Attach the file to an existing issue.
    ///
    /// A single remote effect, so no partial state is possible.
    #[instrument(skip(self, bytes), fields(issue_key = %issue_key, file_name = %file_name))]
    pub async fn attach_to_issue(
        &self,
        issue_key: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<WorkflowOutcome, WorkflowError> {
        self.client
            .add_attachment(issue_key, file_name, bytes)
            .await
            .map_err(|source| WorkflowError {
                stage: WorkflowStage::AddAttachment,
                source,
            })?;

        Ok(WorkflowOutcome::Attached {
            issue_key: issue_key.to_string(),
        })
    }
}
