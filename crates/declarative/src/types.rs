//! Core types for declarative resource reconciliation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a resource should exist after reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    /// The resource should exist
    #[default]
    Present,
    /// The resource should not exist
    Absent,
}

impl Presence {
    /// The declaration keyword for this presence
    pub fn as_str(&self) -> &'static str {
        match self {
            Presence::Present => "present",
            Presence::Absent => "absent",
        }
    }
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observed state of a resource
///
/// Every reconciliation starts from `Unknown`; existence is always queried,
/// never assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResourceState {
    /// Existence has not been determined
    #[default]
    Unknown,
    /// The authority reports the resource
    Present,
    /// The authority does not report the resource
    Absent,
}

impl ResourceState {
    /// State for an existence check result
    pub fn from_exists(exists: bool) -> Self {
        if exists { Self::Present } else { Self::Absent }
    }

    /// Check if state represents presence
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present)
    }

    /// Check if state represents absence
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Corrective action chosen by the planner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Already converged
    None,
    /// Create the resource
    Create,
    /// Update the existing resource in place
    Update,
    /// Remove the resource
    Remove,
}

impl Action {
    /// Whether this action changes the resource
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Lowercase name of the action
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::None => "none",
            Action::Create => "create",
            Action::Update => "update",
            Action::Remove => "remove",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the external command that carried out an action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` if the process did not exit normally
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Create a command output
    pub fn new(exit_code: Option<i32>, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Whether the command exited with status zero
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Options for a reconciliation run
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileOptions {
    /// Observe and decide, but never run a mutating action
    pub check_mode: bool,
}

/// What one reconciliation observed and did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Identifier of the reconciled resource
    pub resource_id: String,
    /// Whether the resource existed before any action
    pub existed_before: bool,
    /// Action taken, or that would be taken in check mode
    pub action: Action,
    /// The action was decided but not run
    pub check_mode: bool,
    /// Exit code of the action, if one ran
    pub exit_code: Option<i32>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl ReconcileOutcome {
    /// Outcome of a decision, before any command ran
    pub fn decided(resource_id: impl Into<String>, existed_before: bool, action: Action) -> Self {
        Self {
            resource_id: resource_id.into(),
            existed_before,
            action,
            check_mode: false,
            exit_code: None,
            stdout: None,
            stderr: None,
        }
    }

    /// Record the output of the command that carried out the action
    pub fn with_output(mut self, output: CommandOutput) -> Self {
        self.exit_code = output.exit_code;
        self.stdout = Some(output.stdout);
        self.stderr = Some(output.stderr);
        self
    }

    /// Whether the resource was (or in check mode, would be) changed
    pub fn changed(&self) -> bool {
        self.action.is_change()
    }
}
