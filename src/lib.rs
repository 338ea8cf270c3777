//! bugdrop - attach captured files to Jira issues.
//!
//! The core is the client orchestration layer: authentication, project
//! resolution, file validation, issue creation, and attachment upload,
//! including the two-step create-then-attach sequence and its
//! partial-failure semantics. The CLI in [`cli`] is a thin shell over it;
//! any other frontend can drive the same workflows through
//! [`workflow::IssueSubmitter`] or the non-blocking [`tasks::TaskSpawner`].

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod tasks;
pub mod validate;
pub mod workflow;

pub use api::{ApiError, JiraClient};
pub use config::Settings;
pub use error::AppError;
pub use workflow::{IssueSubmitter, WorkflowOutcome};
