//! Loading the repository list.
//!
//! The list is a plain text file with one reference per line. Every line is
//! kept, blank ones included, so a malformed entry shows up in the report
//! instead of disappearing silently.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};

/// Read every line of the repository list, in file order.
///
/// Line terminators (`\n` or `\r\n`) are stripped. A final newline does not
/// produce a trailing empty entry. Bytes that are not valid UTF-8 are replaced
/// rather than rejected, so a garbled line fails on its own when processed.
///
/// # Errors
///
/// Returns [`Error::RepositoryList`] if the file cannot be opened or a read
/// fails part-way through.
pub fn load(path: &Path) -> Result<Vec<String>> {
    let list_error = |source| Error::RepositoryList {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(list_error)?;
    let mut lines = Vec::new();
    for line in BufReader::new(file).split(b'\n') {
        let mut bytes = line.map_err(list_error)?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        lines.push(String::from_utf8_lossy(&bytes).into_owned());
    }

    tracing::debug!(
        path = %path.display(),
        entries = lines.len(),
        "repository list loaded"
    );
    Ok(lines)
}
