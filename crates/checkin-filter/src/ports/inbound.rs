//! Inbound Ports (Driving Ports)
//!
//! The API that callers (the CLI, or any embedding service) use to admit
//! and look up identifiers.

use crate::domain::Item;

/// Primary check-in API (Driving Port)
///
/// Implementations must make `check_in` atomic: for a given item, at most
/// one call ever returns `true`, even when called from several threads.
pub trait CheckInApi: Send + Sync {
    /// Admit `item` if it has not been seen
    ///
    /// Returns `true` for a first-time check-in (now recorded), `false` if
    /// the item is already present.
    fn check_in(&self, item: &Item<'_>) -> bool;

    /// Record `item` without reporting whether it was new
    fn record(&self, item: &Item<'_>);

    /// Test whether `item` might already be recorded
    fn is_known(&self, item: &Item<'_>) -> bool;
}
