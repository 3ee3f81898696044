// rc522/src/device/builder.rs

use embedded_hal::delay::DelayNs;

use crate::device::handle::{Initialized, Rc522, Uninitialized};
use crate::transport::Transport;
use crate::utils::PollPolicy;
use crate::{Error, Result};

/// Helper to construct a reader with optional configuration.
pub struct Rc522Builder<T, D> {
    transport: Option<T>,
    delay: Option<D>,
    poll: PollPolicy,
}

impl<T: Transport, D: DelayNs> Default for Rc522Builder<T, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport, D: DelayNs> Rc522Builder<T, D> {
    pub fn new() -> Self {
        Self {
            transport: None,
            delay: None,
            poll: PollPolicy::default(),
        }
    }

    /// Provide the link to the chip (e.g. a `BitBangTransport` or `MockChip`)
    pub fn with_transport(mut self, transport: T) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Provide the delay used for IRQ polling and loop pacing
    pub fn with_delay(mut self, delay: D) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// Consume the builder and return an uninitialized reader.
    /// Requires a transport and a delay; otherwise returns NotConfigured.
    pub fn build_uninitialized(self) -> Result<Rc522<T, D, Uninitialized>> {
        let transport = self.transport.ok_or(Error::NotConfigured("transport"))?;
        let delay = self.delay.ok_or(Error::NotConfigured("delay"))?;
        Ok(Rc522::new(transport, delay).with_poll_policy(self.poll))
    }

    /// Build and run chip bring-up.
    pub fn build(self) -> Result<Rc522<T, D, Initialized>> {
        self.build_uninitialized()?.initialize()
    }
}
