//! codeowners-pr - open pull requests that add a CODEOWNERS file
//!
//! Reads the repository list, checks every repository for a CODEOWNERS file
//! and opens a pull request adding one where it is missing. Failures are
//! printed as they happen; pull request URLs and confirmations follow once
//! the batch is done.

use anyhow::{Context, Result};
use clap::Parser;
use codeowners_pr_core::{Config, GitHubClient, repo_list};

mod args;
mod logging;

use args::Args;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init(&args.log_level, args.log_json)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting codeowners-pr");

    let mut config = if let Some(config_path) = &args.config {
        Config::load_from(config_path)
            .with_context(|| format!("failed to load config from {}", config_path.display()))?
    } else {
        Config::load().context("failed to load configuration")?
    };
    args.apply_to(&mut config);
    config.validate().context("invalid configuration")?;

    let references = repo_list::load(&config.input.repositories).with_context(|| {
        format!(
            "failed to read repository list {}",
            config.input.repositories.display()
        )
    })?;

    let client =
        GitHubClient::new(&config.api, &args.token).context("failed to create GitHub client")?;

    let summary = codeowners_pr_core::run(&config, &client, references, std::io::stdout())
        .await
        .context("failed to write report")?;

    tracing::info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "codeowners-pr finished"
    );
    Ok(())
}
