//! GitHub REST payloads.
//!
//! Only the fields the workflow reads are modelled; everything else in the
//! responses is ignored by serde.

use serde::{Deserialize, Serialize};

/// A file or directory entry from the contents API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentEntry {
    /// Entry name.
    pub name: String,
    /// Path from the repository root.
    pub path: String,
    /// Blob SHA.
    pub sha: String,
    /// Entry kind: `file`, `dir`, `symlink` or `submodule`.
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Response of `GET /repos/{owner}/{repo}/contents/{path}`.
///
/// A file path yields a single entry, a directory path yields a listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Contents {
    /// The path names a file (or symlink/submodule).
    File(ContentEntry),
    /// The path names a directory.
    Directory(Vec<ContentEntry>),
}

/// Repository metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    /// Name of the default branch.
    pub default_branch: String,
}

/// Object a git reference points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitObject {
    /// Commit SHA.
    pub sha: String,
    /// Object type, normally `commit`.
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// A git reference such as `refs/heads/main`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitRef {
    /// Fully qualified reference name.
    #[serde(rename = "ref")]
    pub name: String,
    /// Target object.
    pub object: GitObject,
}

/// Commit created by the contents API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Commit {
    /// Commit SHA.
    pub sha: String,
}

/// Response of `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileCommit {
    /// The new commit.
    pub commit: Commit,
}

/// A created pull request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    /// Pull request number.
    pub number: u64,
    /// Web URL of the pull request.
    pub html_url: String,
}

/// Parameters for opening a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPullRequest {
    /// Title.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Branch holding the changes.
    pub head: String,
    /// Branch the changes merge into.
    pub base: String,
}

/// Body of `POST /repos/{owner}/{repo}/git/refs`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateRefRequest<'a> {
    #[serde(rename = "ref")]
    pub name: &'a str,
    pub sha: &'a str,
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateFileRequest<'a> {
    pub message: &'a str,
    /// Base64 encoded file content.
    pub content: String,
    pub branch: &'a str,
}

/// Error body returned by the API.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
