//! Configuration types and loading.
//!
//! This module provides configuration structures for codeowners-pr: where the
//! hosting API lives, which repository list to read, what to commit, and how
//! the batch runs.

mod remediation;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
pub use remediation::{
    BRANCH_SHA_LENGTH, CodeownersConfig, DEFAULT_CODEOWNERS_PATH, PullRequestConfig,
};

use crate::error::{Error, Result};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "CODEOWNERS_PR_CONFIG";

/// File name searched for in the current and user config directories.
pub const CONFIG_FILE_NAME: &str = "codeowners-pr.toml";

/// Default GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Main configuration for codeowners-pr.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Hosting API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Input settings.
    #[serde(default)]
    pub input: InputConfig,

    /// CODEOWNERS file and branch settings.
    #[serde(default)]
    pub codeowners: CodeownersConfig,

    /// Pull request settings.
    #[serde(default)]
    pub pull_request: PullRequestConfig,

    /// Batch execution settings.
    #[serde(default)]
    pub run: RunConfig,
}

/// Hosting API connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the REST API (GitHub Enterprise uses `https://host/api/v3`).
    #[serde(default = "default_api_url")]
    pub base_url: String,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout. Requests never time out when unset.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            user_agent: default_user_agent(),
            timeout_seconds: None,
        }
    }
}

/// Where the repository references come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Newline-delimited list of `<host>/<owner>/<name>` references.
    #[serde(default = "default_repositories")]
    pub repositories: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            repositories: default_repositories(),
        }
    }
}

/// Batch execution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Number of repositories processed at once. `1` is strictly sequential.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Only check for the file; never create branches, files or pull requests.
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            dry_run: false,
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_user_agent() -> String {
    format!("codeowners-pr/{}", env!("CARGO_PKG_VERSION"))
}

fn default_repositories() -> PathBuf {
    PathBuf::from("repositories.txt")
}

const fn default_concurrency() -> usize {
    1
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// Paths checked in order:
    /// 1. `$CODEOWNERS_PR_CONFIG`
    /// 2. `./codeowners-pr.toml`
    /// 3. `<config dir>/codeowners-pr/codeowners-pr.toml`
    ///
    /// Falls back to the built-in defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read, parsed or validated.
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::load_from(Path::new(&path));
        }

        let local_config = PathBuf::from(CONFIG_FILE_NAME);
        if local_config.exists() {
            return Self::load_from(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("codeowners-pr").join(CONFIG_FILE_NAME);
            if user_config.exists() {
                return Self::load_from(&user_config);
            }
        }

        tracing::debug!("no configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist, parsing fails, or a value
    /// is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ConfigNotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;

        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// Called by [`Config::load_from`]; callers that override values after
    /// loading should call it again.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api.base_url).map_err(|e| {
            Error::InvalidConfig(format!("api.base_url '{}': {e}", self.api.base_url))
        })?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidConfig(format!(
                "api.base_url '{}' cannot be used as a base URL",
                self.api.base_url
            )));
        }
        if self.api.user_agent.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "api.user_agent cannot be empty".to_string(),
            ));
        }
        if self.api.timeout_seconds == Some(0) {
            return Err(Error::InvalidConfig(
                "api.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        if self.codeowners.path.trim_matches('/').is_empty() {
            return Err(Error::InvalidConfig(
                "codeowners.path cannot be empty".to_string(),
            ));
        }
        if self.codeowners.branch_prefix.is_empty() {
            return Err(Error::InvalidConfig(
                "codeowners.branch_prefix cannot be empty".to_string(),
            ));
        }
        if self.run.concurrency == 0 {
            return Err(Error::InvalidConfig(
                "run.concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
