//! Command-line interface.
//!
//! A thin presentation shell over the workflows: it loads settings, runs the
//! boundary file validation, and renders outcomes. The partial-success case
//! (issue created, attachment failed) prints its own message and a retry
//! hint instead of a bare error, since the issue already exists.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;

use crate::api::error::ApiError;
use crate::api::types::IssueDraft;
use crate::api::{auth, JiraClient};
use crate::config::{ConfigError, Settings};
use crate::error::{AppError, Result};
use crate::validate::{self, FileValidation};
use crate::workflow::IssueSubmitter;

#[derive(Debug, Parser)]
#[command(name = "bugdrop", version, about = "Attach captured files to Jira issues")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save the Jira connection settings and API token
    Setup {
        /// Jira instance URL, e.g. https://company.atlassian.net
        #[arg(long)]
        url: String,
        /// Account email used for API authentication
        #[arg(long)]
        email: String,
        /// API token (stored in the OS keyring, not on disk)
        #[arg(long)]
        token: String,
        /// Project keys to offer for quick issue creation (repeatable)
        #[arg(long = "project", value_name = "KEY")]
        projects: Vec<String>,
    },
    /// List the projects visible to the configured account
    Projects,
    /// Create a new issue and attach the file to it
    Submit {
        /// The file to attach
        file: PathBuf,
        /// Project key for the new issue, e.g. ABC
        #[arg(long)]
        project: String,
        /// One-line issue summary
        #[arg(long)]
        summary: String,
        /// Optional issue description
        #[arg(long)]
        description: Option<String>,
    },
    /// Attach the file to an existing issue
    Attach {
        /// The file to attach
        file: PathBuf,
        /// Key of the issue to attach to, e.g. ABC-123
        #[arg(long)]
        issue: String,
    },
}

/// Run the parsed command to completion.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Setup {
            url,
            email,
            token,
            projects,
        } => setup(url, email, token, projects).await,
        Command::Projects => projects().await,
        Command::Submit {
            file,
            project,
            summary,
            description,
        } => submit(&file, project, summary, description).await,
        Command::Attach { file, issue } => attach(&file, issue).await,
    }
}

async fn setup(url: String, email: String, token: String, projects: Vec<String>) -> Result<()> {
    let settings = Settings {
        email: email.clone(),
        url,
        selected_projects: projects,
        ..Settings::default()
    };
    settings.validate()?;

    auth::store_token(&email, &token)?;
    settings.save()?;
    info!("Settings saved");

    // Verify the connection before declaring victory
    let client = JiraClient::with_credentials(&settings.url, &email, &token)?;
    let visible = client.list_projects().await?;

    println!("Configuration saved.");
    println!("Connected to {} ({} projects visible).", settings.url, visible.len());
    Ok(())
}

async fn projects() -> Result<()> {
    let settings = load_settings()?;
    let client = JiraClient::from_settings(&settings)?;

    let projects = client.list_projects().await?;
    if projects.is_empty() {
        println!("No projects visible to this account.");
        return Ok(());
    }

    for project in projects {
        println!("{:<12} {}", project.key, project.name);
    }
    Ok(())
}

async fn submit(
    file: &Path,
    project: String,
    summary: String,
    description: Option<String>,
) -> Result<()> {
    let settings = load_settings()?;
    let (file_name, bytes) = read_validated(file, &settings)?;

    let client = JiraClient::from_settings(&settings)?;
    let submitter = IssueSubmitter::new(&client);

    let mut draft = IssueDraft::bug(project, summary);
    if let Some(description) = description {
        draft = draft.with_description(description);
    }

    let outcome = submitter
        .create_issue_and_attach(&draft, &file_name, bytes)
        .await?;

    println!("{}", outcome.user_message());
    if outcome.is_partial() {
        println!(
            "Retry with: bugdrop attach {} --issue {}",
            file.display(),
            outcome.issue_key()
        );
    }
    Ok(())
}

async fn attach(file: &Path, issue: String) -> Result<()> {
    let settings = load_settings()?;
    let (file_name, bytes) = read_validated(file, &settings)?;

    let client = JiraClient::from_settings(&settings)?;
    let submitter = IssueSubmitter::new(&client);

    let outcome = submitter.attach_to_issue(&issue, &file_name, bytes).await?;
    println!("{}", outcome.user_message());
    Ok(())
}

/// Load saved settings, mapping an absent config file to the
/// no-session-established error.
fn load_settings() -> Result<Settings> {
    Settings::load().map_err(|e| match e {
        ConfigError::Missing => AppError::Api(ApiError::NotInitialized),
        other => other.into(),
    })
}

/// Validate the file at the boundary, then read its contents.
///
/// Workflows treat a valid file as a precondition, so the check happens
/// here, before any network call.
fn read_validated(file: &Path, settings: &Settings) -> Result<(String, Vec<u8>)> {
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("file")
        .to_string();

    let size = std::fs::metadata(file)?.len();
    let verdict = validate::validate_file_with_policy(
        &file_name,
        size,
        settings.max_file_size_bytes(),
        validate::SUPPORTED_EXTENSIONS,
    );

    if let FileValidation::FileTooLarge(msg) | FileValidation::UnsupportedFormat(msg) = verdict {
        return Err(AppError::other(msg));
    }

    let bytes = std::fs::read(file)?;
    Ok((file_name, bytes))
}
