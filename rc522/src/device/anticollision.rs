// rc522/src/device/anticollision.rs
//! ISO 14443-3 type A identification: REQA, then one cascade round per
//! UID segment (anti-collision, BCC check, hardware CRC_A, SELECT).
//!
//! A collision is reported as an error instead of being resolved bit by
//! bit, so exactly one card must be in the field.

use embedded_hal::delay::DelayNs;
use log::{debug, info};

use crate::constants::{UID_BCC_LEN, UID_HEX_CAPACITY};
use crate::device::config::{CRC_IRQ, FIFO_FLUSH, VALUES_AFTER_COLL};
use crate::device::handle::{Initialized, Rc522};
use crate::device::registers::{ChipCommand, Register};
use crate::protocol::{
    Accumulator, CascadeLevel, PiccCommand, UidAssembler, encode_crc_input, encode_reqa,
    encode_select, verify_bcc,
};
use crate::transport::Transport;
use crate::types::{AtqA, ErrorFlags, Sak, Uid};
use crate::utils::bytes_to_hex_spaced;
use crate::{Error, Result};

impl<T: Transport, D: DelayNs> Rc522<T, D, Initialized> {
    /// Broadcast REQA. Any reception counts as a card in the field; the
    /// ATQA is returned when the answer was long enough to carry one.
    pub fn request(&mut self) -> Result<Option<AtqA>> {
        self.clear_bits(Register::Coll, VALUES_AFTER_COLL)?;
        let answer = self
            .transceive(&encode_reqa(), PiccCommand::ReqA.tx_last_bits())?
            .ok_or(Error::NoCard)?;
        debug!("ATQA: {}", bytes_to_hex_spaced(&answer));
        Ok(AtqA::try_from(answer.as_slice()).ok())
    }

    /// Run a full identification attempt and return the card's UID.
    pub fn read_uid(&mut self) -> Result<Uid> {
        let atqa = self.request()?;
        if let Some(size) = atqa.and_then(|a| a.announced_uid_size()) {
            debug!("card announces a {:?} size UID", size);
        }

        // nothing is partially identified at this point
        let mut acc = Accumulator::new();
        let mut uid = UidAssembler::new();
        let mut level = CascadeLevel::One;
        loop {
            let sak = self.cascade(level, &mut acc)?;
            let segment = acc.uid_bytes();
            match level.next() {
                Some(next) if sak.cascade_pending() => {
                    uid.push_cascaded(&segment);
                    level = next;
                }
                _ => {
                    uid.push_final(&segment);
                    break;
                }
            }
        }

        let uid = uid.finish()?;
        info!("card {} identified", uid);
        Ok(uid)
    }

    /// Identify the card in the field and render its UID as NUL-terminated
    /// lowercase hex into `out`.
    ///
    /// Every failure collapses to `false` and leaves `out` untouched; use
    /// [`read_uid`](Self::read_uid) to see the reason.
    pub fn acquire_identifier(&mut self, out: &mut [u8; UID_HEX_CAPACITY]) -> bool {
        match self.read_uid() {
            Ok(uid) => {
                uid.write_hex(out);
                true
            }
            Err(Error::NoCard) => false,
            Err(e) => {
                debug!("identification failed: {}", e);
                false
            }
        }
    }

    /// One cascade round. On return `acc` holds uid0..uid3, BCC and the
    /// CRC_A of the SELECT frame.
    fn cascade(&mut self, level: CascadeLevel, acc: &mut Accumulator) -> Result<Sak> {
        let cmd = level.select_command();
        if level != CascadeLevel::One {
            acc.truncate_for_next_level();
        }

        let frame = encode_select(cmd, acc.known_bits());
        let answer = self
            .transceive(&frame, cmd.tx_last_bits())?
            .ok_or(Error::CascadeTimeout { level })?;
        debug!("{} answer: {}", level, bytes_to_hex_spaced(&answer));

        verify_bcc(&answer)?;
        let mut uid_bcc = [0u8; UID_BCC_LEN];
        uid_bcc.copy_from_slice(&answer[..UID_BCC_LEN]);
        acc.store_uid_bcc(&uid_bcc);

        self.check_errors()?;

        let crc = self.calculate_crc(level, &encode_crc_input(cmd, acc.as_slice()))?;
        acc.append_crc(crc);

        self.select(level, acc)
    }

    fn check_errors(&mut self) -> Result<()> {
        let flags = ErrorFlags::from(self.read_register(Register::Error)?);
        if flags.is_fatal() {
            return Err(Error::ChipError(flags));
        }
        Ok(())
    }

    /// Let the chip's co-processor compute CRC_A over `data`; returns
    /// `[low, high]`.
    fn calculate_crc(&mut self, level: CascadeLevel, data: &[u8]) -> Result<[u8; 2]> {
        self.issue_command(ChipCommand::Idle)?;
        self.write_register(Register::DivIrq, CRC_IRQ)?;
        self.write_register(Register::FifoLevel, FIFO_FLUSH)?;
        self.write_fifo(data)?;
        self.issue_command(ChipCommand::CalcCrc)?;

        if !self.wait_for_irq(Register::DivIrq, CRC_IRQ)? {
            return Err(Error::CrcTimeout { level });
        }
        self.issue_command(ChipCommand::Idle)?;

        let low = self.read_register(Register::CrcResultLow)?;
        let high = self.read_register(Register::CrcResultHigh)?;
        Ok([low, high])
    }

    fn select(&mut self, level: CascadeLevel, acc: &Accumulator) -> Result<Sak> {
        let cmd = level.select_command();
        let frame = encode_select(cmd, acc.as_slice());
        let answer = self
            .transceive(&frame, cmd.tx_last_bits())?
            .ok_or(Error::SelectTimeout { level })?;
        let sak = answer.first().copied().ok_or(Error::InvalidLength {
            expected: 1,
            actual: 0,
        })?;
        debug!("{} SAK: {:#04x}", level, sak);
        Ok(Sak::from(sak))
    }
}
