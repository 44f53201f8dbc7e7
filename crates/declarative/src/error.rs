//! Error taxonomy for reconciliation
//!
//! Every error is fatal for the invocation: nothing is retried, rolled back
//! or downgraded to a partial success.

use crate::types::Action;
use thiserror::Error;

/// Errors that abort a reconciliation
#[derive(Debug, Error)]
pub enum Error {
    /// The declaration violates a constraint; raised before the authority is contacted
    #[error("invalid declaration for {resource}: {reason}")]
    InvalidDeclaration { resource: String, reason: String },

    /// Existence could not be determined
    #[error("could not determine state of {resource}: {message}")]
    Query {
        resource: String,
        message: String,
        exit_code: Option<i32>,
    },

    /// A mutating action could not be run or exited unsuccessfully
    #[error("{action} of {resource} failed{}{}", exit_suffix(.exit_code), stderr_suffix(.stderr))]
    Execution {
        resource: String,
        action: Action,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

impl Error {
    /// Create an invalid declaration error
    pub fn invalid(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDeclaration {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    /// Create a query error
    pub fn query(resource: impl Into<String>, message: impl ToString, exit_code: Option<i32>) -> Self {
        Self::Query {
            resource: resource.into(),
            message: message.to_string(),
            exit_code,
        }
    }

    /// Exit code of the failed process, when one is known
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::InvalidDeclaration { .. } => None,
            Error::Query { exit_code, .. } | Error::Execution { exit_code, .. } => *exit_code,
        }
    }

    /// Message for the failure record
    ///
    /// A failed action reports what the authority printed on stderr.
    pub fn message(&self) -> String {
        match self {
            Error::Execution { stderr, .. } if !stderr.trim().is_empty() => {
                stderr.trim().to_string()
            }
            other => other.to_string(),
        }
    }
}

fn exit_suffix(code: &Option<i32>) -> String {
    code.map(|c| format!(" with exit code {c}"))
        .unwrap_or_default()
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Result type for reconciliation
pub type Result<T> = std::result::Result<T, Error>;
