#[path = "../common/mod.rs"]
mod common;

use proptest::prelude::*;
use rc522::UID_HEX_CAPACITY;
use rc522::protocol::{UidAssembler, render_segments};

#[test]
fn render_double_size_segments() {
    let mut out = [0u8; UID_HEX_CAPACITY];
    let n = render_segments(&[&[0x11, 0x22, 0x33], &[0x44, 0x55, 0x66, 0x77]], &mut out).unwrap();
    assert_eq!(n, 14);
    assert_eq!(common::buffer_str(&out), "11223344556677");
}

#[test]
fn render_triple_fills_buffer() {
    let uid = common::fixtures::triple_uid();
    let mut out = [0xffu8; UID_HEX_CAPACITY];
    let n = render_segments(&[&uid[..3], &uid[3..6], &uid[6..]], &mut out).unwrap();
    assert_eq!(n, 20);
    assert_eq!(out[20], 0);
}

proptest! {
    #[test]
    fn single_round_is_eight_lowercase_chars(uid in any::<[u8; 4]>()) {
        let mut a = UidAssembler::new();
        a.push_final(&uid);
        let hex = a.finish().unwrap().to_hex();
        prop_assert_eq!(hex.len(), 8);
        prop_assert_eq!(hex, hex::encode(uid));
    }
}
