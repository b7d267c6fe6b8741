//! Service Layer
//!
//! Application service that exposes the filter to concurrent callers
//! through the `CheckInApi` port.

pub mod check_in_service;

pub use check_in_service::{CheckInService, FilterStats};
