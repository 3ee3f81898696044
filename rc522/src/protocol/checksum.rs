// rc522/src/protocol/checksum.rs

use crate::{Error, Result};

/// Compute the Block Check Character over uid0..uid3.
/// BCC = uid0 ^ uid1 ^ uid2 ^ uid3
pub fn bcc(uid: &[u8]) -> u8 {
    uid.iter().fold(0u8, |acc, &b| acc ^ b)
}

/// Verify an anti-collision answer `uid0 uid1 uid2 uid3 bcc`.
pub fn verify_bcc(answer: &[u8]) -> Result<()> {
    if answer.len() < 5 {
        return Err(Error::InvalidLength {
            expected: 5,
            actual: answer.len(),
        });
    }
    let expected = bcc(&answer[..4]);
    if answer[4] != expected {
        return Err(Error::ChecksumMismatch {
            expected,
            actual: answer[4],
        });
    }
    Ok(())
}
