//! Jira API client and types.
//!
//! This module provides the interface for communicating with the Jira REST API.

pub mod auth;
pub mod error;
pub mod types;

mod client;

pub use auth::Auth;
pub use client::JiraClient;
pub use error::ApiError;
