//! # Check-in Filter
//!
//! An add-only Bloom filter that answers "has this identifier been seen
//! before?" in sub-linear memory. False positives are bounded by the
//! configured rate; false negatives are impossible.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure filter logic, no I/O, no locking
//!   - `MembershipFilter`: the bit array and its three operations
//!   - `Item`: text / raw-byte input canonicalization
//!   - `IndexPositions`: SHA-256 double-hashing index sequence
//!   - `FilterConfig` / `FilterConfigBuilder`: validated configuration
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `CheckInApi`: Driving port (inbound API)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `CheckInService`: Implements `CheckInApi` behind a single mutex
//!
//! ## Invariants
//!
//! - **No false negatives**: after `insert(x)`, `might_contain(x)` is true
//! - **Monotonic bits**: no operation ever clears a bit
//! - **At-most-once admission**: `check_in_and_sign(x)` returns `true` at most once per `x`
//!
//! ## Usage Example
//!
//! ```
//! use checkin_filter::MembershipFilter;
//!
//! let mut filter = MembershipFilter::new(100, 0.01)?;
//! assert!(filter.check_in_and_sign("alice"));
//! assert!(!filter.check_in_and_sign("alice"));
//! assert!(filter.might_contain(b"alice"));
//! # Ok::<(), checkin_filter::FilterError>(())
//! ```
//!
//! ## Concurrent use
//!
//! ```
//! use checkin_filter::{CheckInApi, CheckInService, Item, MembershipFilter};
//! use std::sync::Arc;
//!
//! let service = Arc::new(CheckInService::new(MembershipFilter::new(1_000, 0.01)?));
//! assert!(service.check_in(&Item::from("bob")));
//! assert!(!service.check_in(&Item::from("bob")));
//! # Ok::<(), checkin_filter::FilterError>(())
//! ```

pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use domain::{FilterConfig, FilterConfigBuilder, FilterParams, IndexPositions, Item, MembershipFilter};
pub use error::FilterError;
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::CheckInApi;
pub use service::{CheckInService, FilterStats};
