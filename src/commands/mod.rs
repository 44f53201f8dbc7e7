// Reconciliation of one declaration
pub mod reconcile;

// Read-only listings
pub mod list;
