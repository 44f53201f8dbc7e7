//! Error types for nine-manage-vhosts operations.
//!
//! Only failures to talk to the tool, or to understand what it listed, are
//! errors here. A mutating command that exits non-zero is returned as a
//! [`CommandOutput`](crate::types::CommandOutput) so the caller decides how to
//! classify it.

use crate::types::ResourceKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while driving `nine-manage-vhosts`.
#[derive(Debug, Error)]
pub enum Error {
    /// The management tool could not be located
    #[error("{program} not found (searched {searched})")]
    ToolNotFound {
        /// Program name that was looked up
        program: String,
        /// Human-readable list of the locations that were searched
        searched: String,
    },

    /// The configured tool path does not exist
    #[error("configured tool path does not exist: {0}")]
    ToolPathMissing(PathBuf),

    /// The process could not be spawned or waited on
    #[error("failed to execute {command}: {source}")]
    Spawn {
        /// Redacted command line
        command: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A list query exited unsuccessfully
    #[error("{kind} list failed{}: {}", exit_suffix(.exit_code), .stderr.trim())]
    QueryFailed {
        /// Kind that was being listed
        kind: ResourceKind,
        /// Process exit code, if the process exited normally
        exit_code: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// A list query returned output that is not a valid listing
    #[error("could not parse {kind} listing: {source}")]
    Parse {
        /// Kind that was being listed
        kind: ResourceKind,
        /// JSON error
        #[source]
        source: serde_json::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Exit code of the failed process, when one is known.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::QueryFailed { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}

fn exit_suffix(code: &Option<i32>) -> String {
    code.map(|c| format!(" with exit code {c}"))
        .unwrap_or_default()
}

/// Result type for nine-manage-vhosts operations.
pub type Result<T> = std::result::Result<T, Error>;
