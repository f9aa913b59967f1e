//! Error types for codeowners-pr-core.
//!
//! This module defines the canonical error type for the library. Errors that
//! happen while remediating a single repository are wrapped in
//! [`Error::Step`] so the report names the step that failed.

use std::fmt;
use std::path::PathBuf;

/// A step of the per-repository remediation workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStep {
    /// Looking up the CODEOWNERS file.
    CheckCodeowners,
    /// Fetching repository metadata for the default branch.
    GetRepository,
    /// Resolving the default branch reference.
    GetBaseRef,
    /// Creating the new branch.
    CreateBranch,
    /// Committing the CODEOWNERS file.
    CreateFile,
    /// Opening the pull request.
    CreatePullRequest,
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::CheckCodeowners => "error checking CODEOWNERS file",
            Self::GetRepository => "error getting repository info",
            Self::GetBaseRef => "error getting reference for base branch",
            Self::CreateBranch => "error creating new branch",
            Self::CreateFile => "error creating CODEOWNERS file",
            Self::CreatePullRequest => "error creating pull request",
        };
        f.write_str(text)
    }
}

/// The main error type for codeowners-pr-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The repository list could not be opened or read.
    #[error("failed to read repository list {path:?}: {source}")]
    RepositoryList {
        /// Path of the list file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A repository reference has fewer than three `/`-separated segments.
    #[error("invalid repository format: {0:?}")]
    InvalidReference(String),

    /// The hosting API answered with a non-success status.
    #[error("GitHub API returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// The request never produced a usable response (unsendable token,
    /// connect, TLS, timeout, decode).
    #[error("HTTP transport error: {0}")]
    Http(String),

    /// A remediation step failed for a repository.
    #[error("{repository}: {step}: {source}")]
    Step {
        /// `owner/name` of the repository being processed.
        repository: String,
        /// The step that failed.
        step: WorkflowStep,
        /// What went wrong.
        #[source]
        source: Box<Error>,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    /// Invalid configuration values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Returns `true` if the hosting API reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Wrap this error with the workflow step and repository it occurred in.
    #[must_use]
    pub fn at_step(self, repository: impl Into<String>, step: WorkflowStep) -> Self {
        Self::Step {
            repository: repository.into(),
            step,
            source: Box::new(self),
        }
    }
}

/// A specialized Result type for codeowners-pr-core operations.
pub type Result<T> = std::result::Result<T, Error>;
