//! Async task management for non-blocking workflow runs.
//!
//! A frontend driving bugdrop (a picker dialog, a share sheet) should never
//! block on the network. This module spawns the workflows on background
//! tokio tasks and reports results over a channel the frontend can poll.
//!
//! The pattern:
//! 1. The frontend detects a pending operation (e.g., the user confirmed
//!    the create-issue dialog)
//! 2. Instead of awaiting inline, it calls a spawn method on `TaskSpawner`
//! 3. The frontend keeps rendering and handling input
//! 4. When the task completes, it sends a `WorkflowMessage` through the
//!    channel
//! 5. The frontend polls the channel with `try_recv()` and renders the
//!    outcome

use tokio::sync::mpsc;

use crate::api::types::{IssueDraft, Project};
use crate::api::JiraClient;
use crate::workflow::{IssueSubmitter, WorkflowOutcome};

/// Messages sent from background tasks to the frontend loop.
#[derive(Debug)]
pub enum WorkflowMessage {
    /// Project list fetch result
    ProjectsFetched(Result<Vec<Project>, String>),

    /// Create-issue-and-attach workflow result
    IssueSubmitted {
        result: Result<WorkflowOutcome, String>,
    },

    /// Attach-to-existing-issue workflow result
    AttachmentAdded {
        result: Result<WorkflowOutcome, String>,
    },
}

/// Spawns background tasks for workflow runs.
///
/// Each method clones the client (cheap - the connection pool is shared)
/// and spawns a tokio task that sends its result through the channel.
/// Dropping the receiver abandons results but does not cancel remote side
/// effects already in flight.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<WorkflowMessage>,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<WorkflowMessage>) -> Self {
        Self { tx }
    }

    /// Spawn a task to fetch the project list.
    pub fn spawn_fetch_projects(&self, client: &JiraClient) {
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let result = client.list_projects().await.map_err(|e| e.to_string());
            let _ = tx.send(WorkflowMessage::ProjectsFetched(result));
        });
    }

    /// Spawn the create-issue-and-attach workflow.
    pub fn spawn_create_and_attach(
        &self,
        client: &JiraClient,
        draft: IssueDraft,
        file_name: String,
        bytes: Vec<u8>,
    ) {
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let result = IssueSubmitter::new(&client)
                .create_issue_and_attach(&draft, &file_name, bytes)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(WorkflowMessage::IssueSubmitted { result });
        });
    }

    /// Spawn the attach-to-existing-issue workflow.
    pub fn spawn_attach(
        &self,
        client: &JiraClient,
        issue_key: String,
        file_name: String,
        bytes: Vec<u8>,
    ) {
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let result = IssueSubmitter::new(&client)
                .attach_to_issue(&issue_key, &file_name, bytes)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(WorkflowMessage::AttachmentAdded { result });
        });
    }
}
