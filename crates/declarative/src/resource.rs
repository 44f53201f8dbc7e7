//! Resource trait for declarative reconciliation
//!
//! A Resource is one declared object at an external authority: something
//! that can be observed to exist or not, and changed by at most one
//! authority command per run.

use crate::error::{Error, Result};
use crate::types::{Action, CommandOutput, Presence, ResourceState};
use std::fmt;

/// Core trait for declarative resources
///
/// Every resource kind implements this trait, which provides:
/// - Identity (id, key fields, type)
/// - Declaration (desired presence, validation, secrets)
/// - State detection (a fresh authority query)
/// - State convergence (apply one action)
///
/// # Example
///
/// ```ignore
/// use declarative::{Action, CommandOutput, Presence, Resource, ResourceState, Result};
///
/// #[derive(Debug)]
/// struct Marker { path: String }
///
/// impl Resource for Marker {
///     fn id(&self) -> String { self.path.clone() }
///     fn resource_type(&self) -> &'static str { "marker" }
///     fn key_fields(&self) -> Vec<(&'static str, String)> { vec![("path", self.path.clone())] }
///     fn desired_presence(&self) -> Presence { Presence::Present }
///
///     fn current_state(&self) -> Result<ResourceState> {
///         Ok(ResourceState::from_exists(std::path::Path::new(&self.path).exists()))
///     }
///
///     fn apply(&self, action: Action) -> Result<CommandOutput> {
///         let status = std::process::Command::new("touch").arg(&self.path).status();
///         Ok(CommandOutput::new(status.ok().and_then(|s| s.code()), "", ""))
///     }
/// }
/// ```
pub trait Resource: Send + Sync + fmt::Debug {
    /// Name the resource is reported under
    ///
    /// Stable for the whole run and unique within its type, e.g. the
    /// domain of a virtual host.
    fn id(&self) -> String;

    /// Resource type category, e.g. "virtual_host"
    fn resource_type(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> String {
        format!("{} {}", self.resource_type(), self.id())
    }

    /// Identifying fields, echoed in the result record
    fn key_fields(&self) -> Vec<(&'static str, String)>;

    /// Whether the resource should exist
    fn desired_presence(&self) -> Presence;

    /// The informational `remove` flag of the declaration
    fn remove_requested(&self) -> bool {
        false
    }

    /// Declared secret values by field name
    ///
    /// These never appear in reports; see [`crate::report`].
    fn secrets(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Reject declarations that must not reach the authority
    fn validate(&self) -> Result<()> {
        for (field, value) in self.key_fields() {
            validate_key(&self.id(), field, &value)?;
        }
        Ok(())
    }

    /// Query the authority for the current state
    ///
    /// Must reflect a fresh query; returning `Unknown` is treated as a
    /// query failure.
    fn current_state(&self) -> Result<ResourceState>;

    /// Action to take when the resource should exist and already does
    ///
    /// The default treats an existing resource as converged.
    fn converged_action(&self) -> Action {
        Action::None
    }

    /// Run the authority command for an action
    ///
    /// A non-zero exit is returned as output; the reconciler decides what
    /// it means. `Err` is for commands that could not be run at all.
    fn apply(&self, action: Action) -> Result<CommandOutput>;
}

/// A boxed resource for type-erased storage
pub type BoxedResource = Box<dyn Resource>;

/// Validate one identifying field
///
/// Keys are passed as positional arguments, so they must be non-empty,
/// free of whitespace and control characters, and must not look like a flag.
pub fn validate_key(resource: &str, field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid(resource, format!("{field} must not be empty")));
    }
    if value.starts_with('-') {
        return Err(Error::invalid(
            resource,
            format!("{field} must not start with '-': {value}"),
        ));
    }
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(Error::invalid(
            resource,
            format!("{field} must not contain whitespace: {value:?}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_domains_and_names() {
        assert!(validate_key("a.com", "domain", "example.com").is_ok());
        assert!(validate_key("alice", "name", "alice_01").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_empty() {
        let err = validate_key("", "domain", "").unwrap_err();
        assert!(matches!(err, Error::InvalidDeclaration { .. }));
        assert!(err.to_string().contains("domain must not be empty"));
    }

    #[test]
    fn test_validate_key_rejects_flag_lookalikes() {
        assert!(validate_key("x", "name", "--no-password").is_err());
    }

    #[test]
    fn test_validate_key_rejects_whitespace() {
        assert!(validate_key("x", "alias", "www a.com").is_err());
        assert!(validate_key("x", "alias", "www\na.com").is_err());
    }
}
