// rc522/src/device/handle.rs

use std::marker::PhantomData;

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::device::config::{
    ANTENNA_ON, COM_IRQ_CLEAR_ALL, FIFO_FLUSH, MOD_WIDTH_DEFAULT, MODE_CRC_PRESET_6363, START_SEND,
    TRANSCEIVE_IRQ, TX_ASK_FORCE_100,
};
use crate::device::registers::{ChipCommand, Register};
use crate::transport::Transport;
use crate::utils::PollPolicy;
use crate::Result;

/// Type-state markers
pub struct Uninitialized;
pub struct Initialized;

/// Reader handle that enforces chip bring-up at compile time.
///
/// The handle owns the transport and the delay source, so every register
/// access goes through `&mut self` and two logical callers can never
/// interleave frames on the link.
pub struct Rc522<T, D, State = Uninitialized> {
    transport: T,
    delay: D,
    poll: PollPolicy,
    _state: PhantomData<State>,
}

impl<T: Transport, D: DelayNs> Rc522<T, D, Uninitialized> {
    /// Wrap a transport and a delay source. No bus traffic happens until
    /// [`initialize`](Self::initialize).
    pub fn new(transport: T, delay: D) -> Self {
        Self {
            transport,
            delay,
            poll: PollPolicy::default(),
            _state: PhantomData,
        }
    }

    /// Override the bounded IRQ wait used by the identification steps.
    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// Soft-reset the chip, configure the analog front end and switch the
    /// antenna on.
    pub fn initialize(self) -> Result<Rc522<T, D, Initialized>> {
        let mut this = self;
        this.issue_command(ChipCommand::SoftReset)?;
        this.write_register(Register::ModWidth, MOD_WIDTH_DEFAULT)?;
        this.write_register(Register::Mode, MODE_CRC_PRESET_6363)?;
        this.write_register(Register::TxAsk, TX_ASK_FORCE_100)?;
        this.set_bits(Register::TxControl, ANTENNA_ON)?;
        debug!("reader initialized, antenna on");

        Ok(Rc522 {
            transport: this.transport,
            delay: this.delay,
            poll: this.poll,
            _state: PhantomData,
        })
    }
}

impl<T: Transport, D: DelayNs, State> Rc522<T, D, State> {
    /// Write one register: a single `{addr, value}` frame.
    pub fn write_register(&mut self, reg: Register, value: u8) -> Result<()> {
        self.transport.exchange(&[reg.write_addr(), value])?;
        Ok(())
    }

    /// Read one register: `{addr | 0x80, 0x00}`, first inbound byte.
    pub fn read_register(&mut self, reg: Register) -> Result<u8> {
        let inbound = self.transport.exchange(&[reg.read_addr(), 0x00])?;
        Ok(inbound.first().copied().unwrap_or(0))
    }

    pub fn issue_command(&mut self, cmd: ChipCommand) -> Result<()> {
        self.write_register(Register::Command, cmd.code())
    }

    pub fn set_bits(&mut self, reg: Register, mask: u8) -> Result<()> {
        let value = self.read_register(reg)?;
        self.write_register(reg, value | mask)
    }

    pub fn clear_bits(&mut self, reg: Register, mask: u8) -> Result<()> {
        let value = self.read_register(reg)?;
        self.write_register(reg, value & !mask)
    }

    /// Push `data` into the FIFO in one burst frame.
    pub fn write_fifo(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        let mut outbound = Vec::with_capacity(1 + data.len());
        outbound.push(Register::FifoData.write_addr());
        outbound.extend_from_slice(data);
        self.transport.exchange(&outbound)?;
        Ok(())
    }

    /// Drain the FIFO: read its level `n`, then clock `n` FIFO read
    /// addresses followed by a terminating 0x00.
    pub fn read_fifo(&mut self) -> Result<Vec<u8>> {
        let level = self.read_register(Register::FifoLevel)? as usize;
        if level == 0 {
            return Ok(Vec::new());
        }
        let mut outbound = vec![Register::FifoData.read_addr(); level];
        outbound.push(0x00);
        self.transport.exchange(&outbound)
    }

    /// VersionReg, 0x91/0x92 for genuine MFRC522 parts.
    pub fn read_chip_version(&mut self) -> Result<u8> {
        self.read_register(Register::Version)
    }

    pub fn poll_policy(&self) -> PollPolicy {
        self.poll
    }

    /// Suspend the calling thread for `ms` milliseconds.
    pub fn idle(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give the transport and delay back.
    pub fn release(self) -> (T, D) {
        (self.transport, self.delay)
    }

    /// Sleep one interval, then sample `reg`, until a bit in `mask` shows up
    /// or the attempt budget runs out. Returns whether it showed up.
    pub(crate) fn wait_for_irq(&mut self, reg: Register, mask: u8) -> Result<bool> {
        for _ in 0..self.poll.attempts {
            self.delay.delay_ms(self.poll.interval_ms);
            if self.read_register(reg)? & mask != 0 {
                return Ok(true);
            }
        }
        debug!(
            "{:?} & {:#04x} not raised after {} polls",
            reg, mask, self.poll.attempts
        );
        Ok(false)
    }

    /// Send `frame` to the card and wait for its answer. `Ok(None)` means
    /// the chip never reported reception within the poll budget.
    pub(crate) fn transceive(&mut self, frame: &[u8], tx_last_bits: u8) -> Result<Option<Vec<u8>>> {
        self.issue_command(ChipCommand::Idle)?;
        self.write_register(Register::ComIrq, COM_IRQ_CLEAR_ALL)?;
        self.write_register(Register::FifoLevel, FIFO_FLUSH)?;
        self.write_fifo(frame)?;
        self.issue_command(ChipCommand::Transceive)?;
        self.write_register(Register::BitFraming, START_SEND | tx_last_bits)?;

        if !self.wait_for_irq(Register::ComIrq, TRANSCEIVE_IRQ)? {
            return Ok(None);
        }
        self.read_fifo().map(Some)
    }
}
