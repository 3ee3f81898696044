#[path = "../common/mod.rs"]
mod common;

use rc522::Error;
use rc522::transport::Transport;
use rc522::transport::mock::MockChip;

#[test]
fn frames_shorter_than_two_bytes_are_rejected() {
    let mut chip = MockChip::new();
    assert!(matches!(
        chip.exchange(&[0x02]),
        Err(Error::InvalidLength {
            expected: 2,
            actual: 1
        })
    ));
    assert!(chip.exchanges.is_empty());
}

#[test]
fn boxed_transport_is_usable_as_trait_object() {
    let mut t: Box<dyn Transport> = Box::new(MockChip::new());
    assert_eq!(t.exchange(&[0xEE, 0x00]).unwrap(), vec![0x92]);
}
