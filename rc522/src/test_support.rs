//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockChip setup so tests across the
//! crate and tests/ directory can reuse the same logic.
#![allow(dead_code)]

use crate::device::{Initialized, Rc522, Rc522Builder};
use crate::transport::mock::{MockCard, MockChip, RecordingDelay};
use crate::types::Sak;
use crate::utils::PollPolicy;
use crate::Result;

/// SAK of a MIFARE Classic 1K, continuation bit clear.
pub const SAK_MIFARE_1K: u8 = 0x08;

/// Simulated reader handle as produced by the helpers below.
pub type MockReader = Rc522<MockChip, RecordingDelay, Initialized>;

/// Create and initialize a reader backed by `chip`, with the default
/// 100 ms × 50 poll policy (the delay only records, nothing sleeps).
#[doc(hidden)]
pub fn initialized_mock_reader(chip: MockChip) -> Result<MockReader> {
    Rc522Builder::new()
        .with_transport(chip)
        .with_delay(RecordingDelay::new())
        .with_poll_policy(PollPolicy::default())
        .build()
}

/// Reader with a single card of the given UID in the field.
#[doc(hidden)]
pub fn reader_with_card(uid: &[u8]) -> Result<MockReader> {
    initialized_mock_reader(MockChip::with_card(MockCard::new(uid, SAK_MIFARE_1K)))
}

/// Scripted replies for one cascade round: anti-collision answer
/// (`uid` + BCC) followed by the SAK.
#[doc(hidden)]
pub fn round_replies(uid: [u8; 4], sak: u8) -> Vec<Option<Vec<u8>>> {
    let mut answer = uid.to_vec();
    answer.push(crate::protocol::bcc(&uid));
    vec![Some(answer), Some(vec![sak])]
}

/// Full script: ATQA, then one round per entry.
#[doc(hidden)]
pub fn scripted_identification(rounds: &[([u8; 4], u8)]) -> Vec<Option<Vec<u8>>> {
    let mut script = vec![Some(vec![0x04, 0x00])];
    for &(uid, sak) in rounds {
        script.extend(round_replies(uid, sak));
    }
    script
}

/// SAK value announcing another cascade level.
pub const SAK_CASCADE: u8 = Sak::CASCADE_BIT;
