// rc522/src/constants.rs
//! Common protocol constants used across the crate

/// Longest UID (triple size, three cascade levels)
pub const MAX_UID_LEN: usize = 10;

/// Hex rendering of the longest UID plus its NUL terminator
pub const UID_HEX_CAPACITY: usize = MAX_UID_LEN * 2 + 1;

/// Highest cascade level defined by ISO/IEC 14443-3
pub const MAX_CASCADE_LEVELS: usize = 3;

/// Cascade tag sent in place of uid0 when more UID bytes follow
pub const CASCADE_TAG: u8 = 0x88;

/// NVB for an anti-collision frame with no known UID bits (2 bytes valid)
pub const NVB_NO_KNOWN_BITS: u8 = 0x20;

/// NVB for a full SELECT frame (7 bytes valid)
pub const NVB_FULL_SELECT: u8 = 0x70;

/// Anti-collision answer: uid0..uid3 + BCC
pub const UID_BCC_LEN: usize = 5;

/// Accumulator after the CRC handshake: uid0..uid3 + BCC + CRC_A
pub const SELECT_PAYLOAD_LEN: usize = 7;

/// Register address bit selecting a read access on the serial link
pub const READ_FLAG: u8 = 0x80;

/// Minimum bytes in one transfer: the address byte plus one data byte
pub const MIN_TRANSFER_LEN: usize = 2;
