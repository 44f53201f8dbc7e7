//! # Declarative
//!
//! A framework for idempotent, declarative resource reconciliation.
//!
//! This crate provides the kind-agnostic core: declare whether a resource
//! should exist, observe whether it does, run at most one corrective action
//! and report what happened.
//!
//! ## Core Concepts
//!
//! - **Resource**: Something an external authority can list, create, update and remove
//! - **ResourceState**: What the authority reports (`Unknown` until queried)
//! - **Planner**: The decision table from (desired, exists) to an [`Action`]
//! - **Reconciler**: Validates, queries, plans, applies and classifies
//! - **Report**: The result record handed back to the caller
//!
//! ## Convergence
//!
//! Create and remove are gated by a fresh existence query, so running the
//! same declaration twice without outside interference changes nothing the
//! second time. Kinds whose policy is `Action::Update` re-run the update on
//! every pass, which must be harmless to the authority when nothing differs.
//!
//! ## Example
//!
//! ```ignore
//! use declarative::{FailureReport, ReconcileOptions, Reconciler, Report};
//!
//! let reconciler = Reconciler::new(ReconcileOptions { check_mode: false });
//! match reconciler.reconcile(&resource) {
//!     Ok(outcome) => println!("{}", serde_json::to_string(&Report::new(&resource, &outcome))?),
//!     Err(e) => println!("{}", serde_json::to_string(&FailureReport::new(&resource, &e))?),
//! }
//! ```

pub mod error;
pub mod planner;
pub mod reconcile;
pub mod report;
pub mod resource;
pub mod types;

// Re-export main types at crate root
pub use error::{Error, Result};
pub use planner::plan;
pub use reconcile::{Reconciler, reconcile};
pub use report::{FailureReport, REDACTED, Report};
pub use resource::{BoxedResource, Resource, validate_key};
pub use types::{
    Action, CommandOutput, Presence, ReconcileOptions, ReconcileOutcome, ResourceState,
};
