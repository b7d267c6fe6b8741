//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - The membership filter itself
//! - Item canonicalization
//! - Index generation (SHA-256 double hashing)
//! - Parameter derivation
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No locking; callers serialize access
//! - Pure functions where possible

pub mod config;
pub mod hash_functions;
pub mod item;
pub mod membership_filter;
pub mod parameters;

pub use config::{FilterConfig, FilterConfigBuilder, ENV_EXPECTED_ITEMS, ENV_TARGET_FPR};
pub use hash_functions::{digest_halves, IndexPositions};
pub use item::Item;
pub use membership_filter::MembershipFilter;
pub use parameters::{calculate_fpr, derive_parameters, FilterParams, MAX_BIT_COUNT};
