//! Filter configuration and validation
//!
//! # Example
//!
//! ```
//! use checkin_filter::domain::FilterConfigBuilder;
//!
//! let config = FilterConfigBuilder::new()
//!     .expected_items(10_000)
//!     .target_fpr(0.001)
//!     .build()
//!     .expect("Valid config");
//! assert_eq!(config.expected_items, 10_000);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::parameters::{derive_parameters, FilterParams};
use crate::error::FilterError;

/// Environment variable overriding `expected_items`
pub const ENV_EXPECTED_ITEMS: &str = "CHECKIN_EXPECTED_ITEMS";
/// Environment variable overriding `target_fpr`
pub const ENV_TARGET_FPR: &str = "CHECKIN_TARGET_FPR";

/// Membership filter configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Design capacity (number of distinct items)
    pub expected_items: u64,
    /// Target false positive rate, strictly between 0 and 1
    pub target_fpr: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            expected_items: 100_000_000, // ~114 MiB of bits at 1%
            target_fpr: 0.01,
        }
    }
}

impl FilterConfig {
    /// Create a new configuration with validation
    pub fn new(expected_items: u64, target_fpr: f64) -> Result<Self, FilterError> {
        let config = Self {
            expected_items,
            target_fpr,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate that a filter can be built from this configuration
    pub fn validate(&self) -> Result<(), FilterError> {
        self.parameters().map(|_| ())
    }

    /// Derived filter parameters for this configuration
    pub fn parameters(&self) -> Result<FilterParams, FilterError> {
        let expected_items = i64::try_from(self.expected_items).map_err(|_| {
            FilterError::invalid(i64::MAX, self.target_fpr, "expected_items is too large")
        })?;
        derive_parameters(expected_items, self.target_fpr)
    }

    /// Apply `CHECKIN_EXPECTED_ITEMS` / `CHECKIN_TARGET_FPR` from the process environment
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_EXPECTED_ITEMS) {
            match raw.trim().parse() {
                Ok(n) => {
                    self.expected_items = n;
                    info!(expected_items = n, "Loaded {} from environment", ENV_EXPECTED_ITEMS);
                }
                Err(_) => warn!(value = %raw, "{} must be a positive integer", ENV_EXPECTED_ITEMS),
            }
        }

        if let Some(raw) = lookup(ENV_TARGET_FPR) {
            match raw.trim().parse() {
                Ok(p) => {
                    self.target_fpr = p;
                    info!(target_fpr = p, "Loaded {} from environment", ENV_TARGET_FPR);
                }
                Err(_) => warn!(value = %raw, "{} must be a number", ENV_TARGET_FPR),
            }
        }
    }
}

/// Builder for FilterConfig with validation
#[derive(Default)]
pub struct FilterConfigBuilder {
    expected_items: Option<u64>,
    target_fpr: Option<f64>,
}

impl FilterConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set design capacity
    pub fn expected_items(mut self, n: u64) -> Self {
        self.expected_items = Some(n);
        self
    }

    /// Set target false positive rate
    pub fn target_fpr(mut self, fpr: f64) -> Self {
        self.target_fpr = Some(fpr);
        self
    }

    /// Build the FilterConfig, validating all parameters
    pub fn build(self) -> Result<FilterConfig, FilterError> {
        let defaults = FilterConfig::default();

        let config = FilterConfig {
            expected_items: self.expected_items.unwrap_or(defaults.expected_items),
            target_fpr: self.target_fpr.unwrap_or(defaults.target_fpr),
        };

        config.validate()?;
        Ok(config)
    }
}
