// rc522/src/device/registers.rs
//! MFRC522 register map and PCD command set.
//!
//! Register discriminants are already in wire form: the 6-bit address
//! shifted left by one, bit 0 always zero. Setting bit 7 turns the address
//! into a read access.

use crate::constants::READ_FLAG;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Register {
    Command = 0x01 << 1,
    ComIEn = 0x02 << 1,
    DivIEn = 0x03 << 1,
    ComIrq = 0x04 << 1,
    DivIrq = 0x05 << 1,
    Error = 0x06 << 1,
    FifoData = 0x09 << 1,
    FifoLevel = 0x0A << 1,
    BitFraming = 0x0D << 1,
    Coll = 0x0E << 1,
    Mode = 0x11 << 1,
    TxControl = 0x14 << 1,
    TxAsk = 0x15 << 1,
    /// CRC result, MSB
    CrcResultHigh = 0x21 << 1,
    /// CRC result, LSB
    CrcResultLow = 0x22 << 1,
    ModWidth = 0x24 << 1,
    Version = 0x37 << 1,
}

impl Register {
    pub const ALL: [Register; 17] = [
        Register::Command,
        Register::ComIEn,
        Register::DivIEn,
        Register::ComIrq,
        Register::DivIrq,
        Register::Error,
        Register::FifoData,
        Register::FifoLevel,
        Register::BitFraming,
        Register::Coll,
        Register::Mode,
        Register::TxControl,
        Register::TxAsk,
        Register::CrcResultHigh,
        Register::CrcResultLow,
        Register::ModWidth,
        Register::Version,
    ];

    /// Address byte for a write access.
    pub const fn write_addr(self) -> u8 {
        self as u8
    }

    /// Address byte for a read access.
    pub const fn read_addr(self) -> u8 {
        self as u8 | READ_FLAG
    }

    /// Decode an address byte as sent on the wire (read flag ignored).
    pub fn from_wire(byte: u8) -> Option<Register> {
        let addr = byte & !READ_FLAG;
        Self::ALL.into_iter().find(|r| *r as u8 == addr)
    }
}

/// Commands executed by the reader chip itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ChipCommand {
    Idle = 0x00,
    Mem = 0x01,
    GenerateRandomId = 0x02,
    CalcCrc = 0x03,
    Transmit = 0x04,
    NoCmdChange = 0x07,
    Receive = 0x08,
    Transceive = 0x0C,
    MfAuthent = 0x0E,
    SoftReset = 0x0F,
}

impl ChipCommand {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<ChipCommand> {
        Some(match code & 0x0F {
            0x00 => ChipCommand::Idle,
            0x01 => ChipCommand::Mem,
            0x02 => ChipCommand::GenerateRandomId,
            0x03 => ChipCommand::CalcCrc,
            0x04 => ChipCommand::Transmit,
            0x07 => ChipCommand::NoCmdChange,
            0x08 => ChipCommand::Receive,
            0x0C => ChipCommand::Transceive,
            0x0E => ChipCommand::MfAuthent,
            0x0F => ChipCommand::SoftReset,
            _ => return None,
        })
    }
}
