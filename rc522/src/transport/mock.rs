// rc522/src/transport/mock.rs

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;

use crate::constants::{CASCADE_TAG, MIN_TRANSFER_LEN, NVB_FULL_SELECT, READ_FLAG};
use crate::device::config::{CRC_IRQ, FIFO_FLUSH, START_SEND, TRANSCEIVE_IRQ};
use crate::device::registers::{ChipCommand, Register};
use crate::protocol::{CascadeLevel, PiccCommand, bcc};
use crate::transport::traits::Transport;
use crate::types::Sak;
use crate::{Error, Result};

const VERSION_MFRC522_V2: u8 = 0x92;

/// ISO/IEC 14443-3 CRC_A (preset 0x6363), low byte first. This is what the
/// chip's co-processor produces; the driver itself never computes it.
pub fn crc_a(data: &[u8]) -> [u8; 2] {
    let mut crc: u16 = 0x6363;
    for &b in data {
        let mut ch = b ^ (crc & 0x00ff) as u8;
        ch ^= ch << 4;
        let ch = ch as u16;
        crc = (crc >> 8) ^ (ch << 8) ^ (ch << 3) ^ (ch >> 4);
    }
    [(crc & 0x00ff) as u8, (crc >> 8) as u8]
}

/// A PICC in the field answering REQA, anti-collision and SELECT frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCard {
    uid: Vec<u8>,
    sak: u8,
}

impl MockCard {
    /// `uid` must be 4, 7 or 10 bytes; `sak` is the final SAK.
    pub fn new(uid: &[u8], sak: u8) -> Self {
        assert!(
            matches!(uid.len(), 4 | 7 | 10),
            "UID must be 4, 7 or 10 bytes"
        );
        Self {
            uid: uid.to_vec(),
            sak,
        }
    }

    fn levels(&self) -> usize {
        match self.uid.len() {
            4 => 1,
            7 => 2,
            _ => 3,
        }
    }

    fn atqa(&self) -> [u8; 2] {
        [((self.levels() as u8 - 1) << 6) | 0x04, 0x00]
    }

    /// uid0..uid3 as answered at `level`, cascade tag included.
    pub fn segment(&self, level: usize) -> Option<[u8; 4]> {
        if level >= self.levels() {
            return None;
        }
        let last = level + 1 == self.levels();
        let start = level * 3;
        Some(if last {
            [
                self.uid[start],
                self.uid[start + 1],
                self.uid[start + 2],
                self.uid[start + 3],
            ]
        } else {
            [
                CASCADE_TAG,
                self.uid[start],
                self.uid[start + 1],
                self.uid[start + 2],
            ]
        })
    }

    fn respond(&self, frame: &[u8]) -> Option<Vec<u8>> {
        let (&cmd, rest) = frame.split_first()?;
        if cmd == PiccCommand::ReqA.code() && rest.is_empty() {
            return Some(self.atqa().to_vec());
        }
        let level = CascadeLevel::ALL
            .iter()
            .position(|l| l.select_command().code() == cmd)?;
        let segment = self.segment(level)?;
        let mut answer = segment.to_vec();
        answer.push(bcc(&segment));

        let (&nvb, known) = rest.split_first()?;
        if nvb == NVB_FULL_SELECT && known.len() == 7 {
            // SELECT: only the addressed card answers
            if known[..5] != answer[..] {
                return None;
            }
            let sak = if level + 1 < self.levels() {
                Sak::CASCADE_BIT
            } else {
                self.sak
            };
            let mut reply = vec![sak];
            reply.extend_from_slice(&crc_a(&reply));
            return Some(reply);
        }
        Some(answer)
    }
}

#[derive(Debug, Clone)]
enum Responder {
    Silent,
    Card(MockCard),
    Scripted(VecDeque<Option<Vec<u8>>>),
}

/// A frame the chip sent over the air.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirFrame {
    pub data: Vec<u8>,
    /// Valid bits in the last byte, 0 meaning all eight
    pub last_bits: u8,
}

/// Register-level model of the MFRC522 for unit tests.
///
/// Decodes every exchange the way the chip's serial interface does (first
/// byte is the address, bit 7 selects a read burst), keeps a FIFO and the
/// IRQ flags, runs the CRC co-processor and answers transceive operations
/// from a card model or a script.
#[derive(Debug, Clone)]
pub struct MockChip {
    regs: [u8; 64],
    fifo: VecDeque<u8>,
    responder: Responder,
    error_flags: u8,
    crc_override: Option<[u8; 2]>,
    crc_stalled: bool,
    /// Every raw exchange, address byte included
    pub exchanges: Vec<Vec<u8>>,
    /// Frames sent to the card, in order
    pub air_frames: Vec<AirFrame>,
    /// Data handed to the CRC co-processor, in order
    pub crc_inputs: Vec<Vec<u8>>,
    pub com_irq_reads: usize,
    pub div_irq_reads: usize,
    pub soft_resets: usize,
}

impl Default for MockChip {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChip {
    /// A chip with an empty field.
    pub fn new() -> Self {
        let mut chip = Self {
            regs: [0u8; 64],
            fifo: VecDeque::new(),
            responder: Responder::Silent,
            error_flags: 0,
            crc_override: None,
            crc_stalled: false,
            exchanges: Vec::new(),
            air_frames: Vec::new(),
            crc_inputs: Vec::new(),
            com_irq_reads: 0,
            div_irq_reads: 0,
            soft_resets: 0,
        };
        chip.power_on_defaults();
        chip
    }

    /// A chip with `card` in its field.
    pub fn with_card(card: MockCard) -> Self {
        let mut chip = Self::new();
        chip.responder = Responder::Card(card);
        chip
    }

    /// A chip whose transceive operations are answered from `replies` in
    /// order; `None` means no answer (the IRQ never fires). Once the script
    /// runs out the field is silent.
    pub fn scripted(replies: Vec<Option<Vec<u8>>>) -> Self {
        let mut chip = Self::new();
        chip.responder = Responder::Scripted(replies.into());
        chip
    }

    pub fn set_error_flags(&mut self, flags: u8) {
        self.error_flags = flags;
    }

    /// Force the CRC co-processor result instead of computing CRC_A.
    pub fn set_crc_result(&mut self, crc: [u8; 2]) {
        self.crc_override = Some(crc);
    }

    /// Never raise CRCIRq.
    pub fn stall_crc(&mut self) {
        self.crc_stalled = true;
    }

    pub fn remove_card(&mut self) {
        self.responder = Responder::Silent;
    }

    pub fn register(&self, reg: Register) -> u8 {
        self.regs[Self::index(reg.write_addr())]
    }

    fn index(wire: u8) -> usize {
        ((wire >> 1) & 0x3f) as usize
    }

    fn power_on_defaults(&mut self) {
        self.regs = [0u8; 64];
        self.regs[Self::index(Register::Version.write_addr())] = VERSION_MFRC522_V2;
        self.regs[Self::index(Register::TxControl.write_addr())] = 0x80;
        self.regs[Self::index(Register::Coll.write_addr())] = 0x80;
        self.fifo.clear();
    }

    fn set(&mut self, reg: Register, value: u8) {
        self.regs[Self::index(reg.write_addr())] = value;
    }

    fn read_wire(&mut self, wire: u8) -> u8 {
        match Register::from_wire(wire) {
            Some(Register::FifoData) => self.fifo.pop_front().unwrap_or(0),
            Some(Register::FifoLevel) => self.fifo.len().min(64) as u8,
            Some(Register::Error) => self.error_flags,
            Some(Register::ComIrq) => {
                self.com_irq_reads += 1;
                self.register(Register::ComIrq)
            }
            Some(Register::DivIrq) => {
                self.div_irq_reads += 1;
                self.register(Register::DivIrq)
            }
            _ => self.regs[Self::index(wire)],
        }
    }

    fn write_wire(&mut self, wire: u8, value: u8) {
        match Register::from_wire(wire) {
            Some(Register::Command) => {
                self.set(Register::Command, value);
                self.execute(ChipCommand::from_code(value));
            }
            Some(reg @ (Register::ComIrq | Register::DivIrq)) => {
                // Set1 selects whether the marked bits are set or cleared
                let current = self.register(reg);
                let marked = value & 0x7f;
                let next = if value & 0x80 != 0 {
                    current | marked
                } else {
                    current & !marked
                };
                self.set(reg, next);
            }
            Some(Register::FifoLevel) => {
                if value & FIFO_FLUSH != 0 {
                    self.fifo.clear();
                }
            }
            Some(Register::FifoData) => self.fifo.push_back(value),
            Some(Register::BitFraming) => {
                self.set(Register::BitFraming, value & !START_SEND);
                let transceiving = ChipCommand::from_code(self.register(Register::Command))
                    == Some(ChipCommand::Transceive);
                if value & START_SEND != 0 && transceiving {
                    self.transmit(value & 0x07);
                }
            }
            _ => self.regs[Self::index(wire)] = value,
        }
    }

    fn execute(&mut self, command: Option<ChipCommand>) {
        match command {
            Some(ChipCommand::SoftReset) => {
                self.soft_resets += 1;
                self.power_on_defaults();
            }
            Some(ChipCommand::CalcCrc) => {
                let input: Vec<u8> = self.fifo.drain(..).collect();
                let crc = self.crc_override.unwrap_or_else(|| crc_a(&input));
                self.crc_inputs.push(input);
                if !self.crc_stalled {
                    self.set(Register::CrcResultLow, crc[0]);
                    self.set(Register::CrcResultHigh, crc[1]);
                    let div = self.register(Register::DivIrq) | CRC_IRQ;
                    self.set(Register::DivIrq, div);
                }
            }
            _ => {}
        }
    }

    fn transmit(&mut self, last_bits: u8) {
        let data: Vec<u8> = self.fifo.drain(..).collect();
        let reply = match &mut self.responder {
            Responder::Silent => None,
            Responder::Card(card) => card.respond(&data),
            Responder::Scripted(script) => script.pop_front().flatten(),
        };
        self.air_frames.push(AirFrame { data, last_bits });
        if let Some(bytes) = reply {
            self.fifo.extend(bytes);
            let irq = self.register(Register::ComIrq) | TRANSCEIVE_IRQ;
            self.set(Register::ComIrq, irq);
        }
    }
}

impl Transport for MockChip {
    fn exchange(&mut self, outbound: &[u8]) -> Result<Vec<u8>> {
        if outbound.len() < MIN_TRANSFER_LEN {
            return Err(Error::InvalidLength {
                expected: MIN_TRANSFER_LEN,
                actual: outbound.len(),
            });
        }
        self.exchanges.push(outbound.to_vec());

        if outbound[0] & READ_FLAG != 0 {
            // the value for address i is clocked out while byte i+1 is sent
            let addrs = &outbound[..outbound.len() - 1];
            Ok(addrs.iter().map(|&a| self.read_wire(a)).collect())
        } else {
            for &value in &outbound[1..] {
                self.write_wire(outbound[0], value);
            }
            Ok(vec![0u8; outbound.len() - 1])
        }
    }
}

/// `DelayNs` that only records what it was asked to wait.
#[derive(Debug, Default, Clone)]
pub struct RecordingDelay {
    calls: usize,
    total_ns: u64,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ns += ns as u64;
    }
}
