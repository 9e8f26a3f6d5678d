//! Attendance policy evaluation and preference-aware class allocation.
//!
//! The [`planning`] module holds the pure policy core. [`roster`] adapts CSV
//! exports from attendance trackers into validated subject records, and the
//! remaining modules carry the configuration, telemetry, and error plumbing
//! shared with the service binary.

pub mod config;
pub mod error;
pub mod planning;
pub mod roster;
pub mod telemetry;
