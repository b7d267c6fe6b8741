//! Ports Layer
//!
//! Defines the interface (trait) through which callers drive the filter.

pub mod inbound;

pub use inbound::CheckInApi;
