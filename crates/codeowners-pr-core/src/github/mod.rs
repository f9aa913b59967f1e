//! Hosting API access.
//!
//! [`HostingApi`] is the seam between the workflow and the network. The
//! production implementation is [`GitHubClient`]; tests substitute a
//! recording fake.

mod client;
mod types;

use async_trait::async_trait;
pub use client::GitHubClient;
pub use types::{
    Commit, ContentEntry, Contents, FileCommit, GitObject, GitRef, NewPullRequest, PullRequest,
    Repository,
};

use crate::error::Result;
use crate::reference::RepositoryRef;

/// Operations the remediation workflow needs from a repository host.
///
/// Every method performs exactly one request. Failures are reported as
/// [`crate::Error::Api`] (with the HTTP status) or [`crate::Error::Http`].
#[async_trait]
pub trait HostingApi: Send + Sync {
    /// Fetch a path's contents, optionally at a given ref.
    ///
    /// A missing path is an [`crate::Error::Api`] with status 404.
    async fn get_contents(
        &self,
        repo: &RepositoryRef,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<Contents>;

    /// Fetch repository metadata.
    async fn get_repository(&self, repo: &RepositoryRef) -> Result<Repository>;

    /// Resolve a fully qualified reference such as `refs/heads/main`.
    async fn get_ref(&self, repo: &RepositoryRef, ref_name: &str) -> Result<GitRef>;

    /// Create a reference pointing at `sha`.
    async fn create_ref(&self, repo: &RepositoryRef, ref_name: &str, sha: &str)
    -> Result<GitRef>;

    /// Commit a new file on `branch`.
    async fn create_file(
        &self,
        repo: &RepositoryRef,
        path: &str,
        message: &str,
        content: &[u8],
        branch: &str,
    ) -> Result<FileCommit>;

    /// Open a pull request.
    async fn create_pull_request(
        &self,
        repo: &RepositoryRef,
        pull_request: &NewPullRequest,
    ) -> Result<PullRequest>;
}
