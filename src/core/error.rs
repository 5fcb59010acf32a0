//! Error types of the browsing engine.
//!
//! [BrowseError] separates the failures the browser can recover from (an unreadable directory,
//! a filter that does not compile) from the ones that end the process (an entry whose metadata
//! disappeared in the middle of a listing).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("{}: {source}", path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid filter '{pattern}': {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("lstat {}: {source}", path.display())]
    EntryStatUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BrowseError {
    pub fn unreadable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BrowseError::DirectoryUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Whether the error leaves the engine without a listing it can safely render.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BrowseError::EntryStatUnavailable { .. })
    }

    /// One-line message for the status line.
    ///
    /// Unreadable directories report only the OS error, the way a shell would after a failed `cd`.
    pub fn status_message(&self) -> String {
        match self {
            BrowseError::DirectoryUnreadable { source, .. } => source.to_string(),
            BrowseError::InvalidFilter { source, .. } => {
                // regex errors span several lines; the last one carries the reason
                let text = source.to_string();
                text.lines().last().unwrap_or_default().trim().to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<BrowseError> for io::Error {
    fn from(err: BrowseError) -> Self {
        io::Error::other(err)
    }
}
