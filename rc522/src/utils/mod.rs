//! Utilities for rc522: small, reusable helpers used across the crate.
//!
//! Hex rendering for identifiers and debug dumps, and the polling bound for
//! chip IRQ waits.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
