//! Reconciler - observe, decide, act at most once
//!
//! One call reconciles one resource:
//! 1. Validate the declaration (no authority contact on failure)
//! 2. Query the current state (always fresh, starts from `Unknown`)
//! 3. Plan the action
//! 4. Run it, unless it is a no-op or we are in check mode
//! 5. Classify the exit code
//!
//! A removal is not verified afterwards; the authority's exit code is
//! trusted.

use crate::error::{Error, Result};
use crate::planner::plan;
use crate::resource::Resource;
use crate::types::{Action, ReconcileOptions, ReconcileOutcome, ResourceState};

/// Drives resources to their declared presence
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    options: ReconcileOptions,
}

impl Reconciler {
    /// Create a reconciler
    pub fn new(options: ReconcileOptions) -> Self {
        Self { options }
    }

    /// Reconcile one resource
    pub fn reconcile(&self, resource: &dyn Resource) -> Result<ReconcileOutcome> {
        let id = resource.id();
        resource.validate()?;

        let existed = match resource.current_state()? {
            ResourceState::Present => true,
            ResourceState::Absent => false,
            ResourceState::Unknown => {
                return Err(Error::query(&id, "existence could not be determined", None));
            }
        };

        let desired = resource.desired_presence();
        let action = plan(desired, existed, resource.converged_action());
        log::info!(
            "{}: desired {desired}, {}, action {action}",
            resource.description(),
            if existed { "exists" } else { "missing" }
        );

        let outcome = ReconcileOutcome::decided(&id, existed, action);
        if action == Action::None {
            return Ok(outcome);
        }

        if self.options.check_mode {
            log::info!("check mode: not running {action} for {id}");
            return Ok(ReconcileOutcome {
                check_mode: true,
                ..outcome
            });
        }

        let output = resource.apply(action)?;
        if !output.success() {
            return Err(Error::Execution {
                resource: id,
                action,
                exit_code: output.exit_code,
                stdout: output.stdout,
                stderr: output.stderr,
            });
        }

        Ok(outcome.with_output(output))
    }
}

/// Reconcile one resource with the given options
pub fn reconcile(resource: &dyn Resource, options: ReconcileOptions) -> Result<ReconcileOutcome> {
    Reconciler::new(options).reconcile(resource)
}
