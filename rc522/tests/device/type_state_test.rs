#[path = "../common/mod.rs"]
mod common;

use rc522::device::{Rc522, Rc522Builder, Register};
use rc522::transport::mock::{MockChip, RecordingDelay};
use rc522::utils::PollPolicy;

#[test]
fn initialize_transitions_and_keeps_chip() {
    let device = Rc522::new(MockChip::new(), RecordingDelay::new());
    let mut initialized = device.initialize().unwrap();

    assert_eq!(initialized.read_chip_version().unwrap(), 0x92);
    assert_eq!(initialized.transport().register(Register::TxControl) & 0x03, 0x03);
    assert_eq!(initialized.poll_policy(), PollPolicy::default());
}

#[test]
fn builder_carries_poll_policy() {
    let reader = Rc522Builder::new()
        .with_transport(MockChip::new())
        .with_delay(RecordingDelay::new())
        .with_poll_policy(PollPolicy::new(5, 2))
        .build()
        .unwrap();
    assert_eq!(reader.poll_policy().attempts, 2);
}

#[test]
fn version_is_readable_before_bring_up() {
    let mut device = Rc522::new(MockChip::new(), RecordingDelay::new());
    assert_eq!(device.read_chip_version().unwrap(), 0x92);
    let (chip, _) = device.release();
    assert_eq!(chip.soft_resets, 0);
}
