use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use codeowners_pr_core::github::{
    Commit, ContentEntry, Contents, FileCommit, GitObject, GitRef, NewPullRequest, PullRequest,
    Repository,
};
use codeowners_pr_core::{Error, HostingApi, RepositoryRef, Result};

/// Default branch every fake repository reports.
pub const DEFAULT_BRANCH: &str = "main";

/// Commit the default branch of every fake repository points at.
pub const BASE_SHA: &str = "abcdef1234567890";

/// API operations the fake can be told to fail.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetContents,
    GetRepository,
    GetRef,
    CreateRef,
    CreateFile,
    CreatePullRequest,
}

/// A call received by the fake, with its arguments.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    GetContents {
        repo: String,
        path: String,
    },
    GetRepository {
        repo: String,
    },
    GetRef {
        repo: String,
        ref_name: String,
    },
    CreateRef {
        repo: String,
        ref_name: String,
        sha: String,
    },
    CreateFile {
        repo: String,
        path: String,
        message: String,
        content: String,
        branch: String,
    },
    CreatePullRequest {
        repo: String,
        title: String,
        body: String,
        head: String,
        base: String,
    },
}

#[derive(Debug)]
struct Failure {
    repo: Option<String>,
    operation: Operation,
    status: u16,
}

/// In-memory [`HostingApi`] that records every call.
///
/// By default no repository has a CODEOWNERS file, so every valid reference
/// goes through the full remediation workflow.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct FakeHostingApi {
    calls: Mutex<Vec<ApiCall>>,
    with_codeowners: HashSet<String>,
    failures: Vec<Failure>,
}

#[allow(dead_code)]
impl FakeHostingApi {
    /// Creates a fake where CODEOWNERS is missing everywhere.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `repo` (`owner/name`) as already having the file.
    pub fn with_codeowners(mut self, repo: &str) -> Self {
        self.with_codeowners.insert(repo.to_string());
        self
    }

    /// Makes `operation` fail with `status` for every repository.
    pub fn failing(mut self, operation: Operation, status: u16) -> Self {
        self.failures.push(Failure {
            repo: None,
            operation,
            status,
        });
        self
    }

    /// Makes `operation` fail with `status` for `repo` only.
    pub fn failing_for(mut self, repo: &str, operation: Operation, status: u16) -> Self {
        self.failures.push(Failure {
            repo: Some(repo.to_string()),
            operation,
            status,
        });
        self
    }

    /// Returns every call received so far, in order.
    #[allow(clippy::unwrap_used)]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns the calls made for one repository.
    pub fn calls_for(&self, repo: &str) -> Vec<ApiCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.repo() == repo)
            .collect()
    }

    #[allow(clippy::unwrap_used)]
    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, repo: &RepositoryRef, operation: Operation) -> Result<()> {
        let name = repo.to_string();
        let failure = self.failures.iter().find(|failure| {
            failure.operation == operation
                && failure.repo.as_ref().is_none_or(|target| *target == name)
        });
        match failure {
            Some(failure) => Err(Error::Api {
                status: failure.status,
                message: format!("fake failure for {operation:?}"),
            }),
            None => Ok(()),
        }
    }
}

#[allow(dead_code)]
impl ApiCall {
    /// Repository the call was made against.
    pub fn repo(&self) -> &str {
        match self {
            Self::GetContents { repo, .. }
            | Self::GetRepository { repo }
            | Self::GetRef { repo, .. }
            | Self::CreateRef { repo, .. }
            | Self::CreateFile { repo, .. }
            | Self::CreatePullRequest { repo, .. } => repo,
        }
    }

    /// Returns `true` for calls that change the repository.
    pub const fn is_write(&self) -> bool {
        matches!(
            self,
            Self::CreateRef { .. } | Self::CreateFile { .. } | Self::CreatePullRequest { .. }
        )
    }
}

#[async_trait]
impl HostingApi for FakeHostingApi {
    async fn get_contents(
        &self,
        repo: &RepositoryRef,
        path: &str,
        _git_ref: Option<&str>,
    ) -> Result<Contents> {
        self.record(ApiCall::GetContents {
            repo: repo.to_string(),
            path: path.to_string(),
        });
        self.check(repo, Operation::GetContents)?;

        if self.with_codeowners.contains(&repo.to_string()) {
            Ok(Contents::File(ContentEntry {
                name: "CODEOWNERS".to_string(),
                path: path.to_string(),
                sha: "3d21ec53a331a6f037a91c368710b99387d012c1".to_string(),
                kind: "file".to_string(),
            }))
        } else {
            Err(Error::Api {
                status: 404,
                message: "Not Found".to_string(),
            })
        }
    }

    async fn get_repository(&self, repo: &RepositoryRef) -> Result<Repository> {
        self.record(ApiCall::GetRepository {
            repo: repo.to_string(),
        });
        self.check(repo, Operation::GetRepository)?;

        Ok(Repository {
            default_branch: DEFAULT_BRANCH.to_string(),
        })
    }

    async fn get_ref(&self, repo: &RepositoryRef, ref_name: &str) -> Result<GitRef> {
        self.record(ApiCall::GetRef {
            repo: repo.to_string(),
            ref_name: ref_name.to_string(),
        });
        self.check(repo, Operation::GetRef)?;

        Ok(GitRef {
            name: ref_name.to_string(),
            object: GitObject {
                sha: BASE_SHA.to_string(),
                kind: "commit".to_string(),
            },
        })
    }

    async fn create_ref(&self, repo: &RepositoryRef, ref_name: &str, sha: &str) -> Result<GitRef> {
        self.record(ApiCall::CreateRef {
            repo: repo.to_string(),
            ref_name: ref_name.to_string(),
            sha: sha.to_string(),
        });
        self.check(repo, Operation::CreateRef)?;

        Ok(GitRef {
            name: ref_name.to_string(),
            object: GitObject {
                sha: sha.to_string(),
                kind: "commit".to_string(),
            },
        })
    }

    async fn create_file(
        &self,
        repo: &RepositoryRef,
        path: &str,
        message: &str,
        content: &[u8],
        branch: &str,
    ) -> Result<FileCommit> {
        self.record(ApiCall::CreateFile {
            repo: repo.to_string(),
            path: path.to_string(),
            message: message.to_string(),
            content: String::from_utf8_lossy(content).into_owned(),
            branch: branch.to_string(),
        });
        self.check(repo, Operation::CreateFile)?;

        Ok(FileCommit {
            commit: Commit {
                sha: "0000000000000000000000000000000000000001".to_string(),
            },
        })
    }

    async fn create_pull_request(
        &self,
        repo: &RepositoryRef,
        pull_request: &NewPullRequest,
    ) -> Result<PullRequest> {
        self.record(ApiCall::CreatePullRequest {
            repo: repo.to_string(),
            title: pull_request.title.clone(),
            body: pull_request.body.clone(),
            head: pull_request.head.clone(),
            base: pull_request.base.clone(),
        });
        self.check(repo, Operation::CreatePullRequest)?;

        Ok(PullRequest {
            number: 1,
            html_url: format!("https://github.com/{repo}/pull/1"),
        })
    }
}
