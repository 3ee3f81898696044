// rc522/src/transport/traits.rs

use crate::Result;

/// Transport trait abstracts the serial link away from register/protocol logic.
///
/// One call is one chip-select frame. `outbound[0]` is always a register
/// address byte; the byte clocked in while it is sent carries no data and is
/// not returned, so the result is one byte shorter than `outbound`.
///
/// There is no link-level integrity check: whatever was sampled is returned
/// and correctness is left to the BCC/CRC checks above. Errors only report
/// that the link itself could not be driven.
pub trait Transport {
    fn exchange(&mut self, outbound: &[u8]) -> Result<Vec<u8>>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn exchange(&mut self, outbound: &[u8]) -> Result<Vec<u8>> {
        (**self).exchange(outbound)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn exchange(&mut self, outbound: &[u8]) -> Result<Vec<u8>> {
        (**self).exchange(outbound)
    }
}
