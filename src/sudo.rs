//! Elevation prefix for authority commands
//!
//! Every call to nine-manage-vhosts, read-only listings included, runs
//! through the same prefix. There is no scoped acquisition: the prefix
//! program is expected to authorize non-interactively (e.g. a sudoers rule).

use ninekit::Elevation;
use serde::{Deserialize, Serialize};

/// `[sudo]` section of the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SudoConfig {
    /// Prefix authority commands at all
    pub enabled: bool,

    /// Elevation program, e.g. "sudo" or "doas"
    pub program: String,

    /// Arguments placed between the program and the tool (e.g. ["-n"])
    pub args: Vec<String>,
}

impl Default for SudoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "sudo".to_string(),
            args: Vec::new(),
        }
    }
}

impl SudoConfig {
    /// Elevation handed to the backend, `None` when disabled
    pub fn elevation(&self) -> Option<Elevation> {
        if !self.enabled {
            return None;
        }
        Some(Elevation::new(self.program.clone(), self.args.clone()))
    }
}
