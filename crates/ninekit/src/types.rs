//! Core types for nine-manage-vhosts resources and listings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Kind of resource managed by nine-manage-vhosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A virtual host, identified by its domain
    VirtualHost,
    /// A hosting user, identified by its name
    User,
    /// An additional domain served by a virtual host
    Alias,
}

impl ResourceKind {
    /// The sub-command noun understood by the tool.
    pub fn noun(&self) -> &'static str {
        match self {
            ResourceKind::VirtualHost => "virtual-host",
            ResourceKind::User => "user",
            ResourceKind::Alias => "alias",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Mutating verb of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Create a resource
    Create,
    /// Update an existing resource in place
    Update,
    /// Remove a resource
    Remove,
}

impl Verb {
    /// The verb as passed on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Create => "create",
            Verb::Update => "update",
            Verb::Remove => "remove",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of `virtual-host list --json`.
///
/// `domain` is required, so a user record can never be read as a
/// virtual host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualHostEntry {
    /// Primary domain of the virtual host
    pub domain: String,
    /// Additional domains served by the virtual host
    #[serde(default)]
    pub aliases: BTreeSet<String>,
}

impl VirtualHostEntry {
    /// Create an entry without aliases.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            aliases: BTreeSet::new(),
        }
    }

    /// Add an alias to the entry.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.insert(alias.into());
        self
    }
}

/// One element of `user list --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    /// Login name of the user
    pub name: String,
}

impl UserEntry {
    /// Create an entry.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Point-in-time listing of all virtual hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VirtualHostSnapshot {
    /// Entries in the order the tool listed them
    pub entries: Vec<VirtualHostEntry>,
}

impl VirtualHostSnapshot {
    /// Find the entry for a domain.
    pub fn find(&self, domain: &str) -> Option<&VirtualHostEntry> {
        self.entries.iter().find(|e| e.domain == domain)
    }

    /// Whether a virtual host with this domain exists.
    pub fn contains_domain(&self, domain: &str) -> bool {
        self.find(domain).is_some()
    }

    /// Whether `alias` is served by the virtual host for `domain`.
    ///
    /// An alias listed under a different domain does not count.
    pub fn contains_alias(&self, domain: &str, alias: &str) -> bool {
        self.find(domain)
            .is_some_and(|entry| entry.aliases.contains(alias))
    }

    /// Number of listed virtual hosts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the listing is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Point-in-time listing of all users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserSnapshot {
    /// Entries in the order the tool listed them
    pub entries: Vec<UserEntry>,
}

impl UserSnapshot {
    /// Whether a user with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Number of listed users.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the listing is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Optional attributes of a virtual host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualHostAttrs {
    /// Owning user
    pub user: Option<String>,
    /// Path of the document root relative to the user's home
    pub relative_path: Option<String>,
    /// Absolute web root
    pub web_root: Option<String>,
    /// Web server configuration template
    pub template: Option<String>,
}

/// Captured result of one tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl From<std::process::Output> for CommandOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

impl CommandOutput {
    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}
