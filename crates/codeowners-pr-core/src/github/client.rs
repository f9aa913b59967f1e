//! GitHub REST client.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::HostingApi;
use super::types::{
    ApiErrorBody, Contents, CreateFileRequest, CreateRefRequest, FileCommit, GitRef,
    NewPullRequest, PullRequest, Repository,
};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::reference::RepositoryRef;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";
const API_VERSION_HEADER: &str = "x-github-api-version";

/// Credential attached to every request.
#[derive(Debug, Clone)]
enum Credential {
    Anonymous,
    Bearer(HeaderValue),
    /// The token cannot be sent as a header; every request fails with this
    /// reason.
    Unusable(String),
}

impl Credential {
    fn from_token(token: &str) -> Self {
        if token.is_empty() {
            tracing::warn!("access token is empty, requests will be unauthenticated");
            return Self::Anonymous;
        }
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                Self::Bearer(value)
            }
            Err(e) => {
                tracing::warn!("access token is not a valid header value, requests will fail");
                Self::Unusable(e.to_string())
            }
        }
    }
}

/// Authenticated client for the GitHub REST API.
///
/// Built once per run from [`ApiConfig`] and the access token, then shared by
/// reference with every repository workflow. Each method maps to exactly one
/// HTTP request; nothing is retried.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_url: Url,
    credential: Credential,
}

impl GitHubClient {
    /// Create a client for the configured API.
    ///
    /// The token is not validated. An empty token sends no `Authorization`
    /// header, and a token that cannot be encoded as a header makes each
    /// request fail, so both surface per repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn new(config: &ApiConfig, token: &str) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            Error::InvalidConfig(format!("api.base_url '{}': {e}", config.base_url))
        })?;

        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let http = builder.build().map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            credential: Credential::from_token(token),
        })
    }

    /// Build `<base>/repos/{owner}/{name}/<tail...>`.
    ///
    /// Each `tail` element is split on `/` and pushed as separate, percent
    /// encoded path segments.
    pub(crate) fn endpoint(&self, repo: &RepositoryRef, tail: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                Error::InvalidConfig(format!("api.base_url '{}' cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .extend(["repos", repo.owner.as_str(), repo.name.as_str()])
            .extend(
                tail.iter()
                    .flat_map(|part| part.split('/'))
                    .filter(|segment| !segment.is_empty()),
            );
        Ok(url)
    }

    /// Start a request with the GitHub media type, API version and credential.
    fn request(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        let request = self
            .http
            .request(method, url)
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .header(API_VERSION_HEADER, GITHUB_API_VERSION);
        match &self.credential {
            Credential::Anonymous => Ok(request),
            Credential::Bearer(value) => Ok(request.header(AUTHORIZATION, value.clone())),
            Credential::Unusable(reason) => Err(Error::Http(format!(
                "access token is not a valid header value: {reason}"
            ))),
        }
    }

    fn create_ref_request(
        &self,
        repo: &RepositoryRef,
        ref_name: &str,
        sha: &str,
    ) -> Result<RequestBuilder> {
        let body = CreateRefRequest {
            name: ref_name,
            sha,
        };
        Ok(self
            .request(Method::POST, self.endpoint(repo, &["git", "refs"])?)?
            .json(&body))
    }

    fn create_file_request(
        &self,
        repo: &RepositoryRef,
        path: &str,
        message: &str,
        content: &[u8],
        branch: &str,
    ) -> Result<RequestBuilder> {
        let body = CreateFileRequest {
            message,
            content: STANDARD.encode(content),
            branch,
        };
        Ok(self
            .request(Method::PUT, self.endpoint(repo, &["contents", path])?)?
            .json(&body))
    }

    fn create_pull_request_request(
        &self,
        repo: &RepositoryRef,
        pull_request: &NewPullRequest,
    ) -> Result<RequestBuilder> {
        Ok(self
            .request(Method::POST, self.endpoint(repo, &["pulls"])?)?
            .json(pull_request))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| Error::Http(format!("failed to decode response: {e}")));
        }

        let body = response.bytes().await.unwrap_or_default();
        Err(api_error(status, &body))
    }
}

/// Turn a non-success response into [`Error::Api`].
///
/// Uses the `message` field of the JSON body when present, otherwise the
/// status's canonical reason.
fn api_error(status: StatusCode, body: &[u8]) -> Error {
    let message = serde_json::from_slice::<ApiErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });

    Error::Api {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl HostingApi for GitHubClient {
    async fn get_contents(
        &self,
        repo: &RepositoryRef,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<Contents> {
        debug!(repository = %repo, path, git_ref, "fetching contents");
        let mut request = self.request(Method::GET, self.endpoint(repo, &["contents", path])?)?;
        if let Some(git_ref) = git_ref {
            request = request.query(&[("ref", git_ref)]);
        }
        self.send(request).await
    }

    async fn get_repository(&self, repo: &RepositoryRef) -> Result<Repository> {
        debug!(repository = %repo, "fetching repository");
        self.send(self.request(Method::GET, self.endpoint(repo, &[])?)?)
            .await
    }

    async fn get_ref(&self, repo: &RepositoryRef, ref_name: &str) -> Result<GitRef> {
        debug!(repository = %repo, ref_name, "fetching reference");
        let short = ref_name.strip_prefix("refs/").unwrap_or(ref_name);
        self.send(self.request(Method::GET, self.endpoint(repo, &["git", "ref", short])?)?)
            .await
    }

    async fn create_ref(
        &self,
        repo: &RepositoryRef,
        ref_name: &str,
        sha: &str,
    ) -> Result<GitRef> {
        debug!(repository = %repo, ref_name, sha, "creating reference");
        self.send(self.create_ref_request(repo, ref_name, sha)?).await
    }

    async fn create_file(
        &self,
        repo: &RepositoryRef,
        path: &str,
        message: &str,
        content: &[u8],
        branch: &str,
    ) -> Result<FileCommit> {
        debug!(repository = %repo, path, branch, "creating file");
        self.send(self.create_file_request(repo, path, message, content, branch)?)
            .await
    }

    async fn create_pull_request(
        &self,
        repo: &RepositoryRef,
        pull_request: &NewPullRequest,
    ) -> Result<PullRequest> {
        debug!(
            repository = %repo,
            head = %pull_request.head,
            base = %pull_request.base,
            "creating pull request"
        );
        self.send(self.create_pull_request_request(repo, pull_request)?)
            .await
    }
}
