use codeowners_pr_core::{Config, Summary};

use crate::common::fake_api::{FakeHostingApi, Operation};
use crate::common::test_utils::run_to_string;

#[tokio::test]
async fn test_single_repository_end_to_end() {
    let api = FakeHostingApi::new();

    let (output, summary) =
        run_to_string(&Config::default(), &api, &["github.com/acme/widgets"]).await;

    assert_eq!(output, "https://github.com/acme/widgets/pull/1\n");
    assert_eq!(
        summary,
        Summary {
            succeeded: 1,
            failed: 0
        }
    );
}

#[tokio::test]
async fn test_invalid_entry_reports_error_without_calls() {
    let api = FakeHostingApi::new();

    let (output, summary) = run_to_string(&Config::default(), &api, &["gh/foo"]).await;

    assert_eq!(
        output,
        "Error processing repository: invalid repository format: \"gh/foo\"\n"
    );
    assert_eq!(summary.failed, 1);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_errors_first_then_successes_in_order() {
    let api = FakeHostingApi::new()
        .with_codeowners("acme/gadgets")
        .failing_for("acme/broken", Operation::CreateRef, 422);

    let (output, summary) = run_to_string(
        &Config::default(),
        &api,
        &[
            "github.com/acme/widgets",
            "github.com/acme/broken",
            "",
            "github.com/acme/gadgets",
            "github.com/acme/sprockets",
        ],
    )
    .await;

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("Error processing repository: acme/broken: error creating new branch"));
    assert_eq!(
        lines[1],
        "Error processing repository: invalid repository format: \"\""
    );
    assert_eq!(lines[2], "https://github.com/acme/widgets/pull/1");
    assert_eq!(lines[3], "CODEOWNERS File Exist");
    assert_eq!(lines[4], "https://github.com/acme/sprockets/pull/1");
    assert_eq!(
        summary,
        Summary {
            succeeded: 3,
            failed: 2
        }
    );
}

#[tokio::test]
async fn test_failure_does_not_affect_next_repository() {
    let api =
        FakeHostingApi::new().failing_for("acme/broken", Operation::CreatePullRequest, 500);

    let (output, _) = run_to_string(
        &Config::default(),
        &api,
        &["github.com/acme/broken", "github.com/acme/widgets"],
    )
    .await;

    assert!(output.contains("acme/broken: error creating pull request"));
    assert!(output.ends_with("https://github.com/acme/widgets/pull/1\n"));
    assert_eq!(api.calls_for("acme/widgets").len(), 6);
}

#[tokio::test]
async fn test_sequential_calls_do_not_interleave() {
    let api = FakeHostingApi::new();

    run_to_string(
        &Config::default(),
        &api,
        &["github.com/acme/widgets", "github.com/acme/gadgets"],
    )
    .await;

    let repos: Vec<String> = api
        .calls()
        .iter()
        .map(|call| call.repo().to_string())
        .collect();
    assert_eq!(&repos[..6], vec!["acme/widgets"; 6].as_slice());
    assert_eq!(&repos[6..], vec!["acme/gadgets"; 6].as_slice());
}

#[tokio::test]
async fn test_concurrent_batch_keeps_input_order() {
    let api = FakeHostingApi::new().with_codeowners("acme/b");
    let mut config = Config::default();
    config.run.concurrency = 4;

    let (output, summary) = run_to_string(
        &config,
        &api,
        &[
            "github.com/acme/a",
            "github.com/acme/b",
            "github.com/acme/c",
            "github.com/acme/d",
            "github.com/acme/e",
        ],
    )
    .await;

    assert_eq!(
        output,
        "https://github.com/acme/a/pull/1\n\
         CODEOWNERS File Exist\n\
         https://github.com/acme/c/pull/1\n\
         https://github.com/acme/d/pull/1\n\
         https://github.com/acme/e/pull/1\n"
    );
    assert_eq!(summary.succeeded, 5);
    assert_eq!(api.calls().len(), 6 * 4 + 1);
}

#[tokio::test]
async fn test_empty_list() {
    let api = FakeHostingApi::new();

    let (output, summary) = run_to_string(&Config::default(), &api, &[]).await;

    assert!(output.is_empty());
    assert_eq!(summary, Summary::default());
}
