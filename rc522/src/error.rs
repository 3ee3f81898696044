// rc522/src/error.rs

use thiserror::Error;

use crate::protocol::CascadeLevel;
use crate::types::ErrorFlags;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("no card present")]
    NoCard,

    #[error("{level} timed out")]
    CascadeTimeout { level: CascadeLevel },

    #[error("CRC computation timed out at {level}")]
    CrcTimeout { level: CascadeLevel },

    #[error("select at {level} timed out")]
    SelectTimeout { level: CascadeLevel },

    #[error("invalid packet length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Covers both corruption and more than one card answering; the
    /// protocol cannot tell them apart.
    #[error("checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    ChecksumMismatch { expected: u8, actual: u8 },

    #[error("collision or transmission error: {0}")]
    ChipError(ErrorFlags),

    #[error("pin error: {0:?}")]
    Pin(embedded_hal::digital::ErrorKind),

    #[error("reader not configured: missing {0}")]
    NotConfigured(&'static str),

    #[cfg(feature = "server")]
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "server")]
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "server")]
    #[error("card store closed")]
    StoreClosed,
}

impl Error {
    /// Map any `embedded-hal` pin error into the crate error.
    pub fn pin<E: embedded_hal::digital::Error>(err: E) -> Self {
        Error::Pin(err.kind())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
