//! Batch reporting.
//!
//! Failures are written as soon as they happen; success messages are held
//! back and written together once the batch is done.

use std::io::{self, Write};

use tracing::{info, warn};

use crate::error::Result;
use crate::processor::Outcome;

/// Prefix of every failure line.
pub const ERROR_PREFIX: &str = "Error processing repository:";

/// Counts for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Repositories that produced a success message.
    pub succeeded: usize,
    /// Repositories that failed.
    pub failed: usize,
}

/// Collects per-repository results and writes the report.
#[derive(Debug)]
pub struct Reporter<W: Write> {
    out: W,
    messages: Vec<String>,
    failed: usize,
}

impl<W: Write> Reporter<W> {
    /// Create a reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self {
            out,
            messages: Vec::new(),
            failed: 0,
        }
    }

    /// Record the result for `reference`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing a failure line fails.
    pub fn record(&mut self, reference: &str, result: Result<Outcome>) -> io::Result<()> {
        match result {
            Ok(outcome) => {
                info!(reference, outcome = %outcome, "repository processed");
                self.messages.push(outcome.to_string());
            }
            Err(err) => {
                warn!(reference, error = %err, "repository failed");
                self.failed += 1;
                writeln!(self.out, "{ERROR_PREFIX} {err}")?;
                self.out.flush()?;
            }
        }
        Ok(())
    }

    /// Write the held success messages, in recording order.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn finish(mut self) -> io::Result<Summary> {
        for message in &self.messages {
            writeln!(self.out, "{message}")?;
        }
        self.out.flush()?;

        Ok(Summary {
            succeeded: self.messages.len(),
            failed: self.failed,
        })
    }
}
