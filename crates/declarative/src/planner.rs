//! Action planner - the reconciliation decision table

use crate::types::{Action, Presence};

/// Decide the single corrective action for a resource
///
/// | desired | exists | action |
/// |---------|--------|--------|
/// | absent  | yes    | remove |
/// | absent  | no     | none   |
/// | present | no     | create |
/// | present | yes    | `converged` |
///
/// `converged` is the resource kind's policy for an existing resource that
/// should exist: `Action::None` when a match by key is enough, or
/// `Action::Update` for kinds that always refresh in place.
pub fn plan(desired: Presence, exists: bool, converged: Action) -> Action {
    match (desired, exists) {
        (Presence::Absent, true) => Action::Remove,
        (Presence::Absent, false) => Action::None,
        (Presence::Present, false) => Action::Create,
        (Presence::Present, true) => converged,
    }
}
