//! # codeowners-pr-core
//!
//! Core library for making sure a list of repositories each carry a
//! CODEOWNERS file, opening a pull request that adds one where it is missing.
//!
//! ## Architecture
//!
//! - [`repo_list`] - Loading the newline-delimited repository list
//! - [`reference`] - Parsing `<host>/<owner>/<name>` entries
//! - [`github`] - The [`HostingApi`] trait and its GitHub REST implementation
//! - [`processor`] - The per-repository check-and-remediate workflow
//! - [`report`] - Writing failures as they happen and successes at the end
//! - [`config`] - Configuration types and loading
//! - [`error`] - Error types for the library
//!
//! ## Example
//!
//! ```rust,ignore
//! use codeowners_pr_core::{Config, GitHubClient, repo_list, run};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), codeowners_pr_core::Error> {
//!     let config = Config::load()?;
//!     let references = repo_list::load(&config.input.repositories)?;
//!     let client = GitHubClient::new(&config.api, &std::env::var("PAT").unwrap_or_default())?;
//!     run(&config, &client, references, std::io::stdout()).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod github;
pub mod processor;
pub mod reference;
pub mod repo_list;
pub mod report;

use std::io::Write;

pub use config::Config;
pub use error::{Error, Result};
use futures::stream::{self, StreamExt};
pub use github::{GitHubClient, HostingApi};
pub use processor::{Outcome, RepositoryProcessor};
pub use reference::RepositoryRef;
pub use report::{Reporter, Summary};

/// Process every reference and write the report to `out`.
///
/// References are handled `config.run.concurrency` at a time (one by default)
/// and reported in input order. A failing repository is reported and the
/// batch moves on; only a failure to write the report aborts the run.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing to `out` fails.
pub async fn run<W: Write>(
    config: &Config,
    api: &dyn HostingApi,
    references: Vec<String>,
    out: W,
) -> Result<Summary> {
    let concurrency = config.run.concurrency.max(1);
    tracing::info!(
        repositories = references.len(),
        concurrency,
        dry_run = config.run.dry_run,
        "processing repositories"
    );

    let processor = RepositoryProcessor::new(api, config);
    let processor = &processor;
    let mut reporter = Reporter::new(out);

    let mut results = stream::iter(references)
        .map(|reference| async move {
            let result = processor.process(&reference).await;
            (reference, result)
        })
        .buffered(concurrency);

    while let Some((reference, result)) = results.next().await {
        reporter.record(&reference, result)?;
    }

    let summary = reporter.finish()?;
    tracing::info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "batch complete"
    );
    Ok(summary)
}
