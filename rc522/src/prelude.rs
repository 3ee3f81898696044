// rc522/src/prelude.rs

pub use crate::device::{Initialized, Rc522, Rc522Builder, Uninitialized};
pub use crate::device::{ChipCommand, Register};
pub use crate::protocol::{CascadeLevel, PiccCommand};
pub use crate::transport::{BitBangTransport, Transport};
pub use crate::{AtqA, Error, ErrorFlags, Result, Sak, Uid, UidSize};

#[cfg(feature = "server")]
pub use crate::service::{CardStore, CardStoreHandle, ResponseServer, ServerConfig};

// Re-export small utilities for convenience
pub use crate::constants::UID_HEX_CAPACITY;
pub use crate::utils::{PollPolicy, bytes_to_hex, bytes_to_hex_spaced, ms, parse_hex};
