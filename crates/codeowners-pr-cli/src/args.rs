//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use codeowners_pr_core::Config;

/// Report format printed after the options in `--help`.
const OUTPUT_HELP: &str = "\
Output:
  Failures are printed as they happen, one line each:
    Error processing repository: <owner>/<name>: <step>: <cause>
  A reference that cannot be parsed prints without the repository prefix:
    Error processing repository: invalid repository format: \"<line>\"
  Pull request URLs and 'CODEOWNERS File Exist' confirmations follow in list
  order once every repository has been processed. The exit status is zero
  unless the configuration or the repository list cannot be loaded.";

/// Open pull requests that add a CODEOWNERS file
///
/// Reads `<host>/<owner>/<name>` references from a list file, checks each
/// repository for `.github/CODEOWNERS`, and where it is missing creates a
/// branch, commits the file and opens a pull request.
#[derive(Debug, Parser)]
#[command(name = "codeowners-pr")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = OUTPUT_HELP)]
pub struct Args {
    /// Path to configuration file
    ///
    /// If not specified, searches for codeowners-pr.toml in:
    /// 1. $CODEOWNERS_PR_CONFIG environment variable
    /// 2. Current directory
    /// 3. ~/.config/codeowners-pr/codeowners-pr.toml
    #[arg(short, long, value_name = "FILE", env = "CODEOWNERS_PR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Repository list, one reference per line [default: repositories.txt]
    #[arg(short, long, value_name = "FILE")]
    pub repositories: Option<PathBuf>,

    /// Access token used as the bearer credential
    #[arg(long, env = "PAT", hide_env_values = true, default_value = "")]
    pub token: String,

    /// Base URL of the GitHub REST API
    #[arg(long, value_name = "URL", env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Number of repositories processed at once
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: Option<u16>,

    /// Only report which repositories lack the file; create nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level
    ///
    /// Valid values: trace, debug, info, warn, error
    #[arg(short, long, default_value = "warn", env = "CODEOWNERS_PR_LOG")]
    pub log_level: String,

    /// Output logs as JSON (for structured logging)
    #[arg(long, default_value = "false", env = "CODEOWNERS_PR_LOG_JSON")]
    pub log_json: bool,
}

impl Args {
    /// Overlay the command-line values onto a loaded configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(path) = &self.repositories {
            config.input.repositories.clone_from(path);
        }
        if let Some(url) = &self.api_url {
            config.api.base_url.clone_from(url);
        }
        if let Some(concurrency) = self.concurrency {
            config.run.concurrency = usize::from(concurrency);
        }
        if self.dry_run {
            config.run.dry_run = true;
        }
    }
}
