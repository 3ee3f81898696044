// rc522/src/transport/bitbang.rs
//! Software serial link to the MFRC522 built from four GPIO lines.
//!
//! The platform has no bus controller wired to the reader, so every bit is
//! produced by level changes separated by one timing unit (1 ms by default):
//!
//! ```text
//! NSS  ‾‾\____________________ ... _________/‾‾
//! MOSI     X b7 X b6 X ...
//! SCK  ____/‾‾\__/‾‾\__ ...             (sample MISO while high)
//! ```
//!
//! Bits go MSB first, SCK idles low (SPI mode 0).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin, StatefulOutputPin};

use crate::constants::MIN_TRANSFER_LEN;
use crate::device::config::TIMING_UNIT_US;
use crate::transport::traits::Transport;
use crate::{Error, Result};

/// Bit-banged transport over `embedded-hal` pins.
///
/// Pins must already be configured for their direction (NSS, SCK, MOSI as
/// push-pull outputs, MISO as input) by the HAL that produced them.
pub struct BitBangTransport<NSS, SCK, MOSI, MISO, D> {
    nss: NSS,
    sck: SCK,
    mosi: MOSI,
    miso: MISO,
    delay: D,
    unit_us: u32,
}

impl<NSS, SCK, MOSI, MISO, D> BitBangTransport<NSS, SCK, MOSI, MISO, D>
where
    NSS: OutputPin,
    SCK: StatefulOutputPin,
    MOSI: OutputPin,
    MISO: InputPin,
    D: DelayNs,
{
    /// Take ownership of the lines and drive them to their idle levels
    /// (NSS high, SCK low).
    pub fn new(mut nss: NSS, mut sck: SCK, mosi: MOSI, miso: MISO, delay: D) -> Result<Self> {
        sck.set_low().map_err(Error::pin)?;
        nss.set_high().map_err(Error::pin)?;
        Ok(Self {
            nss,
            sck,
            mosi,
            miso,
            delay,
            unit_us: TIMING_UNIT_US,
        })
    }

    /// Override the length of one timing unit.
    pub fn with_timing_unit_us(mut self, unit_us: u32) -> Self {
        self.unit_us = unit_us;
        self
    }

    pub fn timing_unit_us(&self) -> u32 {
        self.unit_us
    }

    /// Give the lines and the delay back to the caller.
    pub fn release(self) -> (NSS, SCK, MOSI, MISO, D) {
        (self.nss, self.sck, self.mosi, self.miso, self.delay)
    }

    fn wait(&mut self) {
        self.delay.delay_us(self.unit_us);
    }

    fn transfer_byte(&mut self, byte: u8) -> Result<u8> {
        let mut read = 0u8;
        for n in (0..8).rev() {
            // every bit must start from an idle clock
            debug_assert!(
                self.sck.is_set_low().unwrap_or(true),
                "SCK not idle at bit boundary"
            );

            if byte & (1 << n) != 0 {
                self.mosi.set_high().map_err(Error::pin)?;
            } else {
                self.mosi.set_low().map_err(Error::pin)?;
            }
            self.wait();

            self.sck.set_high().map_err(Error::pin)?;
            self.wait();

            read <<= 1;
            if self.miso.is_high().map_err(Error::pin)? {
                read |= 1;
            }
            self.wait();

            self.sck.set_low().map_err(Error::pin)?;
            self.wait();
        }
        Ok(read)
    }

    fn clock_frame(&mut self, outbound: &[u8]) -> Result<Vec<u8>> {
        let mut inbound = Vec::with_capacity(outbound.len() - 1);
        for (i, &byte) in outbound.iter().enumerate() {
            let read = self.transfer_byte(byte)?;
            // the byte clocked in during the address phase is meaningless
            if i != 0 {
                inbound.push(read);
            }
        }
        Ok(inbound)
    }
}

impl<NSS, SCK, MOSI, MISO, D> Transport for BitBangTransport<NSS, SCK, MOSI, MISO, D>
where
    NSS: OutputPin,
    SCK: StatefulOutputPin,
    MOSI: OutputPin,
    MISO: InputPin,
    D: DelayNs,
{
    fn exchange(&mut self, outbound: &[u8]) -> Result<Vec<u8>> {
        if outbound.len() < MIN_TRANSFER_LEN {
            return Err(Error::InvalidLength {
                expected: MIN_TRANSFER_LEN,
                actual: outbound.len(),
            });
        }

        self.nss.set_low().map_err(Error::pin)?;
        self.wait();

        let frame = self.clock_frame(outbound);

        // deselect even if a pin failed mid-frame
        self.wait();
        let deselect = self.nss.set_high().map_err(Error::pin);
        self.wait();

        let inbound = frame?;
        deselect?;
        Ok(inbound)
    }
}
