#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use proptest::prelude::*;
use rc522::protocol::{CascadeLevel, bcc};
use rc522::test_support::{SAK_MIFARE_1K, initialized_mock_reader};
use rc522::transport::mock::{MockCard, MockChip};
use rc522::{Error, ErrorFlags, UID_HEX_CAPACITY};

#[test]
fn silent_field_fails_after_exactly_fifty_polls() {
    common::init_logging();
    let mut reader = initialized_mock_reader(MockChip::new()).unwrap();
    let mut out = [0u8; UID_HEX_CAPACITY];
    assert!(!reader.acquire_identifier(&mut out));
    assert_eq!(out, [0u8; UID_HEX_CAPACITY]);

    let (chip, delay) = reader.release();
    assert_eq!(chip.com_irq_reads, 50);
    assert_eq!(common::waited_ms(&delay), 50 * 100);
}

#[test]
fn silent_field_is_no_card() {
    let mut reader = initialized_mock_reader(MockChip::new()).unwrap();
    assert!(matches!(reader.read_uid(), Err(Error::NoCard)));
}

#[test]
fn missing_anticollision_answer_times_out_at_level_one() {
    let chip = MockChip::scripted(vec![Some(fixtures::atqa_single()), None]);
    let mut reader = initialized_mock_reader(chip).unwrap();
    match reader.read_uid() {
        Err(Error::CascadeTimeout { level }) => assert_eq!(level, CascadeLevel::One),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(reader.transport().com_irq_reads, 1 + 50);
}

#[test]
fn missing_sak_is_select_timeout() {
    let chip = MockChip::scripted(vec![
        Some(fixtures::atqa_single()),
        Some(fixtures::answer_with_bcc(fixtures::single_uid())),
        None,
    ]);
    let mut reader = initialized_mock_reader(chip).unwrap();
    assert!(matches!(
        reader.read_uid(),
        Err(Error::SelectTimeout {
            level: CascadeLevel::One
        })
    ));
}

#[test]
fn corrupted_bcc_is_rejected() {
    let chip = MockChip::scripted(vec![
        Some(fixtures::atqa_single()),
        Some(fixtures::answer_with_bad_bcc(fixtures::single_uid())),
        Some(vec![SAK_MIFARE_1K]),
    ]);
    let mut reader = initialized_mock_reader(chip).unwrap();
    match reader.read_uid() {
        Err(Error::ChecksumMismatch { expected, .. }) => {
            assert_eq!(expected, bcc(&fixtures::single_uid()))
        }
        other => panic!("unexpected {:?}", other),
    }
    // nothing reached the CRC unit
    assert!(reader.transport().crc_inputs.is_empty());
}

#[test]
fn short_anticollision_answer_is_rejected() {
    let chip = MockChip::scripted(vec![Some(fixtures::atqa_single()), Some(vec![1, 2, 3])]);
    let mut reader = initialized_mock_reader(chip).unwrap();
    assert!(matches!(
        reader.read_uid(),
        Err(Error::InvalidLength {
            expected: 5,
            actual: 3
        })
    ));
}

#[test]
fn collision_flag_fails_identification() {
    let mut chip = MockChip::with_card(MockCard::new(&fixtures::single_uid(), SAK_MIFARE_1K));
    chip.set_error_flags(ErrorFlags::COLLISION);
    let mut reader = initialized_mock_reader(chip).unwrap();
    let mut out = [0u8; UID_HEX_CAPACITY];
    assert!(!reader.acquire_identifier(&mut out));
    assert_eq!(out, [0u8; UID_HEX_CAPACITY]);
}

#[test]
fn temperature_and_reserved_flags_are_ignored() {
    for flags in [ErrorFlags::TEMPERATURE, ErrorFlags::RESERVED] {
        let mut chip = MockChip::with_card(MockCard::new(&fixtures::single_uid(), SAK_MIFARE_1K));
        chip.set_error_flags(flags);
        let mut reader = initialized_mock_reader(chip).unwrap();
        assert_eq!(reader.read_uid().unwrap().to_hex(), "041a2b3c");
    }
}

#[test]
fn stalled_crc_unit_times_out() {
    let mut chip = MockChip::with_card(MockCard::new(&fixtures::double_uid(), SAK_MIFARE_1K));
    chip.stall_crc();
    let mut reader = initialized_mock_reader(chip).unwrap();
    assert!(matches!(
        reader.read_uid(),
        Err(Error::CrcTimeout {
            level: CascadeLevel::One
        })
    ));
    assert_eq!(reader.transport().div_irq_reads, 50);
}

#[test]
fn card_removed_between_attempts() {
    let chip = MockChip::with_card(MockCard::new(&fixtures::single_uid(), SAK_MIFARE_1K));
    let mut reader = initialized_mock_reader(chip).unwrap();
    assert!(reader.read_uid().is_ok());

    reader.transport_mut().remove_card();
    let mut out = [0u8; UID_HEX_CAPACITY];
    assert!(!reader.acquire_identifier(&mut out));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn any_bad_bcc_never_yields_identifier(uid in any::<[u8; 4]>(), wrong in any::<u8>()) {
        prop_assume!(wrong != bcc(&uid));
        let mut answer = uid.to_vec();
        answer.push(wrong);
        let chip = MockChip::scripted(vec![
            Some(fixtures::atqa_single()),
            Some(answer),
            Some(vec![SAK_MIFARE_1K]),
        ]);
        let mut reader = initialized_mock_reader(chip).unwrap();
        let mut out = [0u8; UID_HEX_CAPACITY];
        prop_assert!(!reader.acquire_identifier(&mut out));
        prop_assert_eq!(out, [0u8; UID_HEX_CAPACITY]);
    }
}
