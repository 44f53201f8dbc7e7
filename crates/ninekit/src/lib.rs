//! # ninekit
//!
//! Rust client for `nine-manage-vhosts`, the management tool of nine managed
//! servers.
//!
//! The tool is the only authority on virtual hosts, users and aliases. This
//! crate:
//! - Lists virtual hosts and users as typed snapshots (`list --json`)
//! - Builds deterministic command lines for create/update/remove
//! - Runs every command through an elevation prefix (`sudo` by default)
//!
//! ## Example
//!
//! ```no_run
//! use ninekit::{BackendConfig, Client, Request, VirtualHostAttrs};
//!
//! let client = Client::new(&BackendConfig::default()).expect("tool not available");
//!
//! let vhosts = client.virtual_hosts().expect("listing failed");
//! if !vhosts.contains_domain("example.com") {
//!     let attrs = VirtualHostAttrs {
//!         web_root: Some("/var/www/example".into()),
//!         ..Default::default()
//!     };
//!     let output = client
//!         .execute(&Request::create_virtual_host("example.com", &attrs))
//!         .expect("could not run tool");
//!     assert!(output.success());
//! }
//! ```
//!
//! ## Freshness
//!
//! Listings are never cached: every call to [`Client::virtual_hosts`] or
//! [`Client::users`] runs the tool again.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod error;
pub mod request;
pub mod types;

pub use backend::{Backend, BackendConfig, DEFAULT_PROGRAM, Elevation};
pub use error::{Error, Result};
pub use request::Request;
pub use types::{
    CommandOutput, ResourceKind, UserEntry, UserSnapshot, Verb, VirtualHostAttrs,
    VirtualHostEntry, VirtualHostSnapshot,
};

use std::fmt;

/// High-level client for nine-manage-vhosts.
pub struct Client {
    backend: Box<dyn Backend>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new Client with the real tool backend.
    ///
    /// Returns an error if the tool cannot be found.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let backend = backend::default_backend(config)?;
        Ok(Self {
            backend: Box::new(backend),
        })
    }

    /// Create a client with a custom backend (useful for testing).
    pub fn with_backend(backend: Box<dyn Backend>) -> Self {
        Self { backend }
    }

    /// List all virtual hosts, including their aliases.
    pub fn virtual_hosts(&self) -> Result<VirtualHostSnapshot> {
        let snapshot = self.backend.list_virtual_hosts()?;
        log::debug!("listed {} virtual hosts", snapshot.len());
        Ok(snapshot)
    }

    /// List all users.
    pub fn users(&self) -> Result<UserSnapshot> {
        let snapshot = self.backend.list_users()?;
        log::debug!("listed {} users", snapshot.len());
        Ok(snapshot)
    }

    /// Run a mutating request.
    pub fn execute(&self, request: &Request) -> Result<CommandOutput> {
        log::debug!("{request}");
        self.backend.execute(request)
    }
}
