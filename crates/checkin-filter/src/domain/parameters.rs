//! Optimal Bloom filter parameter derivation
//!
//! Formulas:
//! - m = ceil(-n*ln(p) / (ln(2)^2))       -- bit count
//! - k = max(1, ceil((m/n) * ln(2)))      -- hash rounds
//!
//! Both are rounded up, never to nearest: the filter is never smaller or
//! weaker than the optimum for the requested capacity.

use std::f64::consts::LN_2;

use crate::error::FilterError;

/// Largest bit count the backing buffer can index.
///
/// Whether a buffer this large can actually be allocated is checked when the
/// filter is built.
pub const MAX_BIT_COUNT: usize = usize::MAX >> 3;

/// Derived filter parameters
#[derive(Clone, Debug, PartialEq)]
pub struct FilterParams {
    /// Number of addressable bit positions (m)
    pub bit_count: usize,
    /// Number of index rounds per item (k)
    pub hash_rounds: usize,
    /// False positive rate once `expected_items` distinct items are recorded
    pub expected_fpr: f64,
}

impl FilterParams {
    /// Size of the backing buffer in bytes
    pub fn byte_len(&self) -> usize {
        self.bit_count.div_ceil(8)
    }
}

/// Check that `(expected_items, target_fpr)` describe a buildable filter
pub fn validate_inputs(expected_items: i64, target_fpr: f64) -> Result<(), FilterError> {
    if expected_items <= 0 {
        return Err(FilterError::invalid(
            expected_items,
            target_fpr,
            "expected_items must be positive",
        ));
    }

    // Written so that NaN fails too.
    if !(target_fpr > 0.0 && target_fpr < 1.0) {
        return Err(FilterError::invalid(
            expected_items,
            target_fpr,
            "target_fpr must lie strictly between 0 and 1",
        ));
    }

    Ok(())
}

/// Derive the bit count and hash rounds for a capacity / error-rate pair
///
/// # Errors
/// `InvalidParameters` when `expected_items <= 0`, when `target_fpr` is not
/// in `(0, 1)`, or when the resulting bit count cannot be indexed on this
/// platform.
pub fn derive_parameters(expected_items: i64, target_fpr: f64) -> Result<FilterParams, FilterError> {
    validate_inputs(expected_items, target_fpr)?;

    let n = expected_items as f64;
    let ln2_squared = LN_2 * LN_2;

    let m = (-(n * target_fpr.ln()) / ln2_squared).ceil();
    if !m.is_finite() || m > MAX_BIT_COUNT as f64 {
        return Err(FilterError::invalid(
            expected_items,
            target_fpr,
            "derived bit count exceeds addressable memory",
        ));
    }
    let bit_count = (m as usize).max(1);

    let k = ((bit_count as f64 / n) * LN_2).ceil() as usize;
    let hash_rounds = k.max(1);

    Ok(FilterParams {
        bit_count,
        hash_rounds,
        expected_fpr: calculate_fpr(bit_count, expected_items as u64, hash_rounds),
    })
}

/// Calculate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: usize, n: u64, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}
