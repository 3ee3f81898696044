#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use proptest::prelude::*;
use rc522::UID_HEX_CAPACITY;
use rc522::protocol::bcc;
use rc522::test_support::{
    SAK_CASCADE, SAK_MIFARE_1K, initialized_mock_reader, reader_with_card, scripted_identification,
};
use rc522::transport::mock::{MockCard, MockChip};

#[test]
fn single_size_uid_with_forced_crc() {
    common::init_logging();
    let uid = fixtures::single_uid();
    let mut chip = MockChip::with_card(MockCard::new(&uid, 0x08));
    chip.set_crc_result([0xAA, 0xBB]);
    let mut reader = initialized_mock_reader(chip).unwrap();

    let mut out = [0xffu8; UID_HEX_CAPACITY];
    assert!(reader.acquire_identifier(&mut out));
    assert_eq!(common::buffer_str(&out), "041a2b3c");
    assert_eq!(out[8], 0);

    // SELECT carries uid, BCC and the chip's CRC verbatim
    let select = &reader.transport().air_frames[2].data;
    assert_eq!(
        select,
        &vec![0x93, 0x70, 0x04, 0x1a, 0x2b, 0x3c, bcc(&uid), 0xAA, 0xBB]
    );
}

#[test]
fn short_atqa_still_counts_as_a_card() {
    for atqa in [vec![0x04], vec![]] {
        let script = vec![
            Some(atqa),
            Some(fixtures::answer_with_bcc(fixtures::single_uid())),
            Some(vec![SAK_MIFARE_1K]),
        ];
        let mut reader = initialized_mock_reader(MockChip::scripted(script)).unwrap();
        let mut out = [0u8; UID_HEX_CAPACITY];
        assert!(reader.acquire_identifier(&mut out));
        assert_eq!(common::buffer_str(&out), "041a2b3c");
    }
}

#[test]
fn double_size_uid() {
    let mut reader = reader_with_card(&fixtures::double_uid()).unwrap();
    let mut out = [0u8; UID_HEX_CAPACITY];
    assert!(reader.acquire_identifier(&mut out));
    assert_eq!(common::buffer_str(&out), "11223344556677");
}

#[test]
fn triple_size_uid() {
    let mut reader = reader_with_card(&fixtures::triple_uid()).unwrap();
    let uid = reader.read_uid().unwrap();
    assert_eq!(uid.to_hex(), "0102030405060708090a");
    assert_eq!(uid.size(), rc522::UidSize::Triple);

    // REQA + 3 × (anti-collision, SELECT)
    assert_eq!(reader.transport().air_frames.len(), 7);
    assert_eq!(reader.transport().crc_inputs.len(), 3);
}

#[test]
fn scripted_double_round_drops_cascade_tag() {
    let script = scripted_identification(&[
        ([0x88, 0x11, 0x22, 0x33], SAK_CASCADE),
        ([0x44, 0x55, 0x66, 0x77], SAK_MIFARE_1K),
    ]);
    let mut reader = initialized_mock_reader(MockChip::scripted(script)).unwrap();
    let mut out = [0u8; UID_HEX_CAPACITY];
    assert!(reader.acquire_identifier(&mut out));
    assert_eq!(common::buffer_str(&out), "11223344556677");
}

#[test]
fn third_level_is_terminal_even_with_cascade_bit() {
    let script = scripted_identification(&[
        ([0x88, 0x01, 0x02, 0x03], SAK_CASCADE),
        ([0x88, 0x04, 0x05, 0x06], SAK_CASCADE),
        ([0x07, 0x08, 0x09, 0x0a], SAK_CASCADE),
    ]);
    let mut reader = initialized_mock_reader(MockChip::scripted(script)).unwrap();
    let uid = reader.read_uid().unwrap();
    assert_eq!(uid.to_hex(), "0102030405060708090a");
    assert_eq!(reader.transport().air_frames.len(), 7);
}

#[test]
fn cascade_rounds_use_select_codes_in_order() {
    let mut reader = reader_with_card(&fixtures::triple_uid()).unwrap();
    reader.read_uid().unwrap();
    let cmds: Vec<u8> = reader
        .transport()
        .crc_inputs
        .iter()
        .map(|input| input[0])
        .collect();
    assert_eq!(cmds, vec![0x93, 0x95, 0x97]);
    assert!(reader.transport().crc_inputs.iter().all(|i| i[1] == 0x70 && i.len() == 7));
}

proptest! {
    #[test]
    fn any_single_uid_renders_as_hex(uid in any::<[u8; 4]>()) {
        let mut reader = reader_with_card(&uid).unwrap();
        let mut out = [0u8; UID_HEX_CAPACITY];
        prop_assert!(reader.acquire_identifier(&mut out));
        prop_assert_eq!(common::buffer_str(&out), hex::encode(uid));
    }

    #[test]
    fn any_cascade_tag_is_discarded(tag in any::<u8>(), first in any::<[u8; 3]>(), second in any::<[u8; 4]>()) {
        let script = scripted_identification(&[
            ([tag, first[0], first[1], first[2]], SAK_CASCADE),
            (second, SAK_MIFARE_1K),
        ]);
        let mut reader = initialized_mock_reader(MockChip::scripted(script)).unwrap();
        let mut out = [0u8; UID_HEX_CAPACITY];
        prop_assert!(reader.acquire_identifier(&mut out));

        let mut expected = first.to_vec();
        expected.extend_from_slice(&second);
        prop_assert_eq!(common::buffer_str(&out), hex::encode(expected));
    }
}
