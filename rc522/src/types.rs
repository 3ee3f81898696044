// rc522/src/types.rs

use std::fmt;
use std::str::FromStr;

use derive_more::From;

use crate::constants::{MAX_UID_LEN, UID_HEX_CAPACITY};
use crate::{Error, Result};

/// UID length class as announced by the number of cascade rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UidSize {
    /// 4 bytes, one cascade level
    Single,
    /// 7 bytes, two cascade levels
    Double,
    /// 10 bytes, three cascade levels
    Triple,
}

impl UidSize {
    pub const fn len(self) -> usize {
        match self {
            UidSize::Single => 4,
            UidSize::Double => 7,
            UidSize::Triple => 10,
        }
    }

    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            4 => Some(UidSize::Single),
            7 => Some(UidSize::Double),
            10 => Some(UidSize::Triple),
            _ => None,
        }
    }
}

/// Card identifier assembled over one to three cascade rounds.
///
/// Stored inline (no allocation); only 4, 7 and 10 byte values can be
/// constructed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uid {
    bytes: [u8; MAX_UID_LEN],
    len: u8,
}

impl Uid {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn size(&self) -> UidSize {
        // len is validated on construction
        UidSize::from_len(self.len as usize).unwrap_or(UidSize::Single)
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }

    /// Render into a caller-supplied, NUL-terminated buffer and return the
    /// number of hex characters written (8, 14 or 20).
    pub fn write_hex(&self, out: &mut [u8; UID_HEX_CAPACITY]) -> usize {
        crate::utils::encode_hex_into(self.as_bytes(), out)
    }
}

impl TryFrom<&[u8]> for Uid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> std::result::Result<Self, Self::Error> {
        if UidSize::from_len(bytes.len()).is_none() {
            return Err(Error::InvalidLength {
                expected: MAX_UID_LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; MAX_UID_LEN];
        arr[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            bytes: arr,
            len: bytes.len() as u8,
        })
    }
}

impl FromStr for Uid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = crate::utils::parse_hex(s).map_err(|_| Error::InvalidLength {
            expected: MAX_UID_LEN * 2,
            actual: s.len(),
        })?;
        Uid::try_from(bytes.as_slice())
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.as_bytes() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uid({})", self)
    }
}

/// Answer to REQA (2 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtqA([u8; 2]);

impl AtqA {
    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 2] {
        &self.0
    }

    /// UID size announced in bits 7..6 of the first byte. Informational only;
    /// the cascade decision is driven by the SAK.
    pub fn announced_uid_size(&self) -> Option<UidSize> {
        match self.0[0] >> 6 {
            0b00 => Some(UidSize::Single),
            0b01 => Some(UidSize::Double),
            0b10 => Some(UidSize::Triple),
            _ => None,
        }
    }
}

impl TryFrom<&[u8]> for AtqA {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> std::result::Result<Self, Self::Error> {
        if bytes.len() < 2 {
            return Err(Error::InvalidLength {
                expected: 2,
                actual: bytes.len(),
            });
        }
        Ok(Self([bytes[0], bytes[1]]))
    }
}

/// Select acknowledge byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, From)]
pub struct Sak(u8);

impl Sak {
    /// Bit 2: UID not complete, another cascade level follows.
    pub const CASCADE_BIT: u8 = 0x04;
    /// Bit 5: PICC compliant with ISO/IEC 14443-4.
    pub const ISO14443_4_BIT: u8 = 0x20;

    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    pub const fn as_u8(self) -> u8 {
        self.0
    }

    pub const fn cascade_pending(self) -> bool {
        self.0 & Self::CASCADE_BIT != 0
    }

    pub const fn iso14443_4_compliant(self) -> bool {
        !self.cascade_pending() && self.0 & Self::ISO14443_4_BIT != 0
    }
}

/// Contents of the chip's error register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, From)]
pub struct ErrorFlags(u8);

impl ErrorFlags {
    pub const PROTOCOL: u8 = 0x01;
    pub const PARITY: u8 = 0x02;
    pub const CRC: u8 = 0x04;
    pub const COLLISION: u8 = 0x08;
    pub const BUFFER_OVERFLOW: u8 = 0x10;
    pub const RESERVED: u8 = 0x20;
    pub const TEMPERATURE: u8 = 0x40;
    pub const WRITE: u8 = 0x80;

    /// Bits that fail an anti-collision round. Reserved and overheating are
    /// not transmission faults.
    pub const FATAL_MASK: u8 = !(Self::RESERVED | Self::TEMPERATURE);

    const NAMES: [(u8, &'static str); 8] = [
        (Self::WRITE, "WrErr"),
        (Self::TEMPERATURE, "TempErr"),
        (Self::RESERVED, "Reserved"),
        (Self::BUFFER_OVERFLOW, "BufferOvfl"),
        (Self::COLLISION, "CollErr"),
        (Self::CRC, "CRCErr"),
        (Self::PARITY, "ParityErr"),
        (Self::PROTOCOL, "ProtocolErr"),
    ];

    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_fatal(self) -> bool {
        self.0 & Self::FATAL_MASK != 0
    }

    pub const fn contains(self, bit: u8) -> bool {
        self.0 & bit != 0
    }
}

impl fmt::Display for ErrorFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)?;
        let mut first = true;
        for (bit, name) in Self::NAMES {
            if self.0 & bit != 0 {
                f.write_str(if first { " (" } else { "|" })?;
                f.write_str(name)?;
                first = false;
            }
        }
        if !first {
            f.write_str(")")?;
        }
        Ok(())
    }
}
