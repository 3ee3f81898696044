// rc522/src/protocol/picc.rs

use derive_more::Display;

use crate::constants::{MAX_CASCADE_LEVELS, NVB_FULL_SELECT, NVB_NO_KNOWN_BITS};

/// Commands sent over the air to the PICC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[repr(u8)]
pub enum PiccCommand {
    /// REQuest type A, a 7-bit short frame
    #[display(fmt = "REQA")]
    ReqA = 0x26,
    #[display(fmt = "SEL1")]
    Sel1 = 0x93,
    #[display(fmt = "SEL2")]
    Sel2 = 0x95,
    #[display(fmt = "SEL3")]
    Sel3 = 0x97,
}

impl PiccCommand {
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Number of valid bits in the last transmitted byte. REQA is the only
    /// short frame; everything else is sent as whole bytes.
    pub const fn tx_last_bits(self) -> u8 {
        match self {
            PiccCommand::ReqA => 7,
            _ => 0,
        }
    }
}

/// One round of the ISO 14443-3 anti-collision loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum CascadeLevel {
    #[display(fmt = "cascade level 1")]
    One,
    #[display(fmt = "cascade level 2")]
    Two,
    #[display(fmt = "cascade level 3")]
    Three,
}

impl CascadeLevel {
    pub const ALL: [CascadeLevel; MAX_CASCADE_LEVELS] =
        [CascadeLevel::One, CascadeLevel::Two, CascadeLevel::Three];

    pub const fn select_command(self) -> PiccCommand {
        match self {
            CascadeLevel::One => PiccCommand::Sel1,
            CascadeLevel::Two => PiccCommand::Sel2,
            CascadeLevel::Three => PiccCommand::Sel3,
        }
    }

    pub const fn next(self) -> Option<CascadeLevel> {
        match self {
            CascadeLevel::One => Some(CascadeLevel::Two),
            CascadeLevel::Two => Some(CascadeLevel::Three),
            CascadeLevel::Three => None,
        }
    }

    /// 1-based level number.
    pub const fn number(self) -> u8 {
        match self {
            CascadeLevel::One => 1,
            CascadeLevel::Two => 2,
            CascadeLevel::Three => 3,
        }
    }
}

/// Encode a REQA frame (payload only; the 7-bit framing is set on the chip).
pub fn encode_reqa() -> Vec<u8> {
    vec![PiccCommand::ReqA.code()]
}

/// Encode an anti-collision / SELECT frame: command, NVB, then the known
/// bytes. NVB is 0x20 while nothing is known, 0x70 afterwards.
pub fn encode_select(cmd: PiccCommand, known: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + known.len());
    out.push(cmd.code());
    out.push(if known.is_empty() {
        NVB_NO_KNOWN_BITS
    } else {
        NVB_FULL_SELECT
    });
    out.extend_from_slice(known);
    out
}

/// Encode the CRC co-processor input for a SELECT frame:
/// command, NVB 0x70, uid0..uid3, BCC.
pub fn encode_crc_input(cmd: PiccCommand, uid_bcc: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + uid_bcc.len());
    out.push(cmd.code());
    out.push(NVB_FULL_SELECT);
    out.extend_from_slice(uid_bcc);
    out
}
