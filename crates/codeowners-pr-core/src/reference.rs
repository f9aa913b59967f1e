//! Repository references as they appear in the input list.

use std::fmt;

use crate::error::{Error, Result};

/// Owner and name of a hosted repository.
///
/// Parsed from a `<host>/<owner>/<name>` line. The first segment is a label
/// only and is discarded, as is anything after the third segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryRef {
    /// Account or organization owning the repository.
    pub owner: String,
    /// Repository name.
    pub name: String,
}

impl RepositoryRef {
    /// Create a reference from its parts.
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse a raw list line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidReference`] if the line has fewer than three
    /// `/`-separated segments.
    pub fn parse(raw: &str) -> Result<Self> {
        let segments: Vec<&str> = raw.split('/').collect();
        match segments.as_slice() {
            [_, owner, name, ..] => Ok(Self::new(*owner, *name)),
            _ => Err(Error::InvalidReference(raw.to_string())),
        }
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
