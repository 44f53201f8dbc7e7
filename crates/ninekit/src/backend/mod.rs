//! Backend abstraction for nine-manage-vhosts operations.
//!
//! The [`Backend`] trait defines the interface for interacting with the
//! management tool, allowing for different implementations (real CLI,
//! in-memory fakes for testing).

pub mod nine;

use crate::error::Result;
use crate::request::Request;
use crate::types::{CommandOutput, UserSnapshot, VirtualHostSnapshot};
use std::path::PathBuf;

/// Default name of the management tool.
pub const DEFAULT_PROGRAM: &str = "nine-manage-vhosts";

/// Backend trait for nine-manage-vhosts operations.
///
/// Listings are queried fresh on every call. Implementations must not
/// cache them, since a listing is the only source of truth for existence.
pub trait Backend: Send + Sync {
    /// Run `virtual-host list --json`.
    fn list_virtual_hosts(&self) -> Result<VirtualHostSnapshot>;

    /// Run `user list --json`.
    fn list_users(&self) -> Result<UserSnapshot>;

    /// Run a mutating request.
    ///
    /// A non-zero exit is reported through [`CommandOutput::exit_code`];
    /// `Err` means the tool could not be run at all.
    fn execute(&self, request: &Request) -> Result<CommandOutput>;
}

/// Command prefix used to run the tool with elevated privileges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elevation {
    /// Elevation program, e.g. `sudo`
    pub program: String,
    /// Arguments placed between the elevation program and the tool
    pub args: Vec<String>,
}

impl Elevation {
    /// Create an elevation prefix.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Plain `sudo`.
    pub fn sudo() -> Self {
        Self::new("sudo", Vec::new())
    }
}

/// How to locate and invoke the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Program name searched for when `path` is not set
    pub program: String,
    /// Explicit path to the tool
    pub path: Option<PathBuf>,
    /// Prefix for every invocation; `None` runs the tool directly
    pub elevation: Option<Elevation>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            path: None,
            elevation: Some(Elevation::sudo()),
        }
    }
}

/// Get the default backend (real nine-manage-vhosts CLI).
pub fn default_backend(config: &BackendConfig) -> Result<nine::NineBackend> {
    nine::NineBackend::new(config)
}
