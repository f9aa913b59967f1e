//! Per-repository workflow.
//!
//! For one list entry: parse the reference, look for the CODEOWNERS file and,
//! only when the host answers 404, branch off the default branch, commit the
//! file and open a pull request. Each call is made once. Nothing created by
//! an earlier step is removed when a later step fails.

use std::fmt;

use tracing::{debug, info};

use crate::config::{CodeownersConfig, Config, PullRequestConfig};
use crate::error::{Error, Result, WorkflowStep};
use crate::github::{HostingApi, NewPullRequest, PullRequest};
use crate::reference::RepositoryRef;

/// Message reported when the file is already present.
pub const ALREADY_PRESENT_MESSAGE: &str = "CODEOWNERS File Exist";

/// Message reported for a missing file in dry-run mode.
pub const DRY_RUN_MESSAGE: &str = "CODEOWNERS missing; would open pull request";

/// Successful result of processing one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The file exists; nothing was created.
    AlreadyPresent,
    /// The file is missing but dry-run mode suppressed all writes.
    Missing,
    /// A pull request adding the file was opened.
    Created {
        /// Web URL of the pull request.
        url: String,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyPresent => f.write_str(ALREADY_PRESENT_MESSAGE),
            Self::Missing => f.write_str(DRY_RUN_MESSAGE),
            Self::Created { url } => f.write_str(url),
        }
    }
}

/// Runs the check-and-remediate workflow against a [`HostingApi`].
pub struct RepositoryProcessor<'a> {
    api: &'a dyn HostingApi,
    codeowners: &'a CodeownersConfig,
    pull_request: &'a PullRequestConfig,
    dry_run: bool,
}

impl<'a> RepositoryProcessor<'a> {
    /// Create a processor using the file, pull request and dry-run settings
    /// of `config`.
    #[must_use]
    pub fn new(api: &'a dyn HostingApi, config: &'a Config) -> Self {
        Self {
            api,
            codeowners: &config.codeowners,
            pull_request: &config.pull_request,
            dry_run: config.run.dry_run,
        }
    }

    /// Process one raw list entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidReference`] without touching the network when
    /// the entry has fewer than three segments, and [`Error::Step`] when any
    /// API call fails (other than the 404 that triggers remediation).
    pub async fn process(&self, raw: &str) -> Result<Outcome> {
        let repo = RepositoryRef::parse(raw)?;

        match self
            .api
            .get_contents(&repo, &self.codeowners.path, None)
            .await
        {
            Ok(_) => {
                debug!(repository = %repo, "CODEOWNERS present");
                return Ok(Outcome::AlreadyPresent);
            }
            Err(e) if e.is_not_found() => {
                debug!(repository = %repo, "CODEOWNERS missing");
            }
            Err(e) => return Err(e.at_step(repo.to_string(), WorkflowStep::CheckCodeowners)),
        }

        if self.dry_run {
            return Ok(Outcome::Missing);
        }

        let pull_request = self.remediate(&repo).await?;
        info!(
            repository = %repo,
            number = pull_request.number,
            url = %pull_request.html_url,
            "pull request opened"
        );
        Ok(Outcome::Created {
            url: pull_request.html_url,
        })
    }

    async fn remediate(&self, repo: &RepositoryRef) -> Result<PullRequest> {
        let fail = |step: WorkflowStep| move |e: Error| e.at_step(repo.to_string(), step);

        let repository = self
            .api
            .get_repository(repo)
            .await
            .map_err(fail(WorkflowStep::GetRepository))?;
        let base_branch = repository.default_branch;

        let base_ref = self
            .api
            .get_ref(repo, &format!("refs/heads/{base_branch}"))
            .await
            .map_err(fail(WorkflowStep::GetBaseRef))?;
        let base_sha = base_ref.object.sha;

        let branch = self.codeowners.branch_name(&base_sha);
        self.api
            .create_ref(repo, &format!("refs/heads/{branch}"), &base_sha)
            .await
            .map_err(fail(WorkflowStep::CreateBranch))?;
        debug!(repository = %repo, branch = %branch, sha = %base_sha, "branch created");

        self.api
            .create_file(
                repo,
                &self.codeowners.path,
                &self.codeowners.commit_message,
                self.codeowners.content.as_bytes(),
                &branch,
            )
            .await
            .map_err(fail(WorkflowStep::CreateFile))?;

        let new_pull_request = NewPullRequest {
            title: self.pull_request.title.clone(),
            body: self.pull_request.body.clone(),
            head: branch,
            base: base_branch,
        };
        self.api
            .create_pull_request(repo, &new_pull_request)
            .await
            .map_err(fail(WorkflowStep::CreatePullRequest))
    }
}
