// rc522/src/protocol/accumulator.rs

use crate::constants::{SELECT_PAYLOAD_LEN, UID_BCC_LEN};

/// Bytes carried through one cascade round.
///
/// Holds uid0..uid3 + BCC after the anti-collision answer, then the two
/// CRC_A bytes produced by the chip, and is finally sent as the SELECT
/// payload. Between rounds the CRC is dropped and the remaining five bytes
/// become the known bits of the next anti-collision frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulator {
    bytes: [u8; SELECT_PAYLOAD_LEN],
    len: usize,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Known bits sent with the next anti-collision frame.
    pub fn known_bits(&self) -> &[u8] {
        self.as_slice()
    }

    /// Replace the contents with a validated anti-collision answer.
    pub fn store_uid_bcc(&mut self, uid_bcc: &[u8; UID_BCC_LEN]) {
        self.bytes[..UID_BCC_LEN].copy_from_slice(uid_bcc);
        self.len = UID_BCC_LEN;
    }

    /// Append the CRC_A computed by the chip (low byte first).
    pub fn append_crc(&mut self, crc: [u8; 2]) {
        debug_assert_eq!(self.len, UID_BCC_LEN, "CRC appended out of order");
        self.bytes[UID_BCC_LEN..SELECT_PAYLOAD_LEN].copy_from_slice(&crc);
        self.len = SELECT_PAYLOAD_LEN;
    }

    /// Drop the previous round's CRC before entering the next cascade level.
    pub fn truncate_for_next_level(&mut self) {
        debug_assert!(
            self.len > UID_BCC_LEN,
            "cascade entered without a completed previous round ({} bytes)",
            self.len
        );
        self.len = self.len.min(UID_BCC_LEN);
    }

    /// uid0..uid3 of the current round.
    pub fn uid_bytes(&self) -> [u8; 4] {
        debug_assert!(self.len >= UID_BCC_LEN, "no anti-collision answer stored");
        [self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3]]
    }
}
