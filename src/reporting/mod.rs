//! Read-side views: per-currency totals and treasury snapshots.

pub mod summary;
pub mod totals;
