// rc522/src/lib.rs

//! rc522
//!
//! Pure Rust driver for MFRC522 contactless readers wired to plain GPIO
//! lines, with ISO 14443-A cascade anti-collision.
#![warn(missing_docs)]

pub mod constants;
pub mod device;
pub mod error;
pub mod prelude;
pub mod protocol;
#[cfg(feature = "server")]
pub mod service;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
