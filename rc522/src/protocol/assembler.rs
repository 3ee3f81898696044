// rc522/src/protocol/assembler.rs

use crate::constants::{MAX_UID_LEN, UID_HEX_CAPACITY};
use crate::types::Uid;
use crate::{Error, Result};

/// Collects the UID segments recorded by each cascade round.
///
/// An intermediate round contributes uid1..uid3 (uid0 is the cascade tag),
/// the terminal round contributes all four bytes, so the finished UID is
/// 4, 7 or 10 bytes long.
#[derive(Debug, Clone, Default)]
pub struct UidAssembler {
    bytes: [u8; MAX_UID_LEN],
    len: usize,
}

impl UidAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, segment: &[u8]) {
        let end = self.len + segment.len();
        debug_assert!(end <= MAX_UID_LEN, "more than three cascade rounds");
        let end = end.min(MAX_UID_LEN);
        let take = end - self.len;
        self.bytes[self.len..end].copy_from_slice(&segment[..take]);
        self.len = end;
    }

    /// Record a round whose SAK announced another cascade level.
    pub fn push_cascaded(&mut self, uid: &[u8; 4]) {
        self.push(&uid[1..]);
    }

    /// Record the terminal round.
    pub fn push_final(&mut self, uid: &[u8; 4]) {
        self.push(uid);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn finish(self) -> Result<Uid> {
        Uid::try_from(self.as_slice())
    }
}

/// Render recorded segments as NUL-terminated lowercase hex.
///
/// Concatenates `segments` in order into `out` and returns the number of
/// characters written. Fails without touching `out` when the total is not a
/// valid UID length.
pub fn render_segments(segments: &[&[u8]], out: &mut [u8; UID_HEX_CAPACITY]) -> Result<usize> {
    let total: usize = segments.iter().map(|s| s.len()).sum();
    if total > MAX_UID_LEN {
        return Err(Error::InvalidLength {
            expected: MAX_UID_LEN,
            actual: total,
        });
    }
    let mut joined = [0u8; MAX_UID_LEN];
    let mut at = 0;
    for s in segments {
        joined[at..at + s.len()].copy_from_slice(s);
        at += s.len();
    }
    let uid = Uid::try_from(&joined[..at])?;
    Ok(uid.write_hex(out))
}
