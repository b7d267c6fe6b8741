//! Error types for the check-in filter

use thiserror::Error;

/// Errors that can occur when building a membership filter
///
/// Only construction can fail. `insert`, `might_contain` and
/// `check_in_and_sign` are total once a filter exists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("Invalid filter parameters (expected_items={expected_items}, target_fpr={target_fpr}): {reason}")]
    InvalidParameters {
        expected_items: i64,
        target_fpr: f64,
        reason: &'static str,
    },
}

impl FilterError {
    pub(crate) fn invalid(expected_items: i64, target_fpr: f64, reason: &'static str) -> Self {
        FilterError::InvalidParameters {
            expected_items,
            target_fpr,
            reason,
        }
    }
}
