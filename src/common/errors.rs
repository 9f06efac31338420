use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type ReplaceResult<T> = Result<T, ReplaceError>;

#[derive(Debug, Error)]
pub enum ReplaceError {
    #[error("no candidate file: `{pattern}` not found in {directory:?}")]
    NotFound { directory: PathBuf, pattern: String },

    #[error("invalid glob pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("invalid target file name `{target}`")]
    InvalidTarget { target: String },

    #[error("failed to scan {path:?}")]
    Scan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to delete existing target {path:?}")]
    Deletion {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to rename {from:?} to {to:?}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ReplaceError {
    /// Process exit status for this failure. `NotFound` is always 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReplaceError::NotFound { .. } => 1,
            ReplaceError::InvalidPattern { .. } | ReplaceError::InvalidTarget { .. } => 2,
            ReplaceError::Scan { .. } => 3,
            ReplaceError::Deletion { .. } => 4,
            ReplaceError::Rename { .. } => 5,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ReplaceError::NotFound { .. })
    }
}

/// Log the full context chain of `error` and hand it back to the caller.
pub fn handle_error(error: anyhow::Error) -> anyhow::Error {
    log::error!("{:?}", error);
    error
}
