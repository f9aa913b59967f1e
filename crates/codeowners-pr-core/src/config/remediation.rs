//! Settings for the files, branches and pull requests the tool creates.

use serde::{Deserialize, Serialize};

/// Default location of the CODEOWNERS file inside a repository.
pub const DEFAULT_CODEOWNERS_PATH: &str = ".github/CODEOWNERS";

/// Number of SHA characters appended to the branch prefix.
pub const BRANCH_SHA_LENGTH: usize = 7;

/// What to commit when a repository has no CODEOWNERS file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodeownersConfig {
    /// Repository path checked and created.
    #[serde(default = "default_path")]
    pub path: String,

    /// File content committed on the new branch.
    #[serde(default = "default_content")]
    pub content: String,

    /// Commit message for the file.
    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    /// Prefix of the new branch; the short base SHA is appended.
    #[serde(default = "default_branch_prefix")]
    pub branch_prefix: String,
}

impl Default for CodeownersConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            content: default_content(),
            commit_message: default_commit_message(),
            branch_prefix: default_branch_prefix(),
        }
    }
}

impl CodeownersConfig {
    /// Name of the branch created from the given base commit.
    ///
    /// Uses the first [`BRANCH_SHA_LENGTH`] characters of `base_sha`, or the
    /// whole SHA when it is shorter.
    #[must_use]
    pub fn branch_name(&self, base_sha: &str) -> String {
        let short: String = base_sha.chars().take(BRANCH_SHA_LENGTH).collect();
        format!("{}{short}", self.branch_prefix)
    }
}

/// Title and body of the pull request that adds the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PullRequestConfig {
    /// Pull request title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Pull request body.
    #[serde(default = "default_body")]
    pub body: String,
}

impl Default for PullRequestConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            body: default_body(),
        }
    }
}

fn default_path() -> String {
    DEFAULT_CODEOWNERS_PATH.to_string()
}

fn default_content() -> String {
    "* @org/team".to_string()
}

fn default_commit_message() -> String {
    "Create CODEOWNERS file".to_string()
}

fn default_branch_prefix() -> String {
    "create-codeowners-".to_string()
}

fn default_title() -> String {
    "Add CODEOWNERS file".to_string()
}

fn default_body() -> String {
    "This PR adds a CODEOWNERS file to define the team responsible for this repo.".to_string()
}
