#[path = "../common/mod.rs"]
mod common;

use rc522::device::{ChipCommand, Register};
use rc522::transport::Transport;
use rc522::transport::mock::{MockChip, crc_a};

#[test]
fn crc_coprocessor_computes_crc_a() {
    let mut chip = MockChip::new();
    chip.exchange(&[Register::FifoData.write_addr(), 0x93, 0x70, 1, 2, 3, 4, 4])
        .unwrap();
    chip.exchange(&[Register::Command.write_addr(), ChipCommand::CalcCrc.code()])
        .unwrap();

    let irq = chip.exchange(&[Register::DivIrq.read_addr(), 0x00]).unwrap();
    assert_eq!(irq[0] & 0x04, 0x04);

    let crc = chip
        .exchange(&[
            Register::CrcResultLow.read_addr(),
            Register::CrcResultHigh.read_addr(),
            0x00,
        ])
        .unwrap();
    assert_eq!(crc, crc_a(&[0x93, 0x70, 1, 2, 3, 4, 4]).to_vec());
}

#[test]
fn writing_irq_register_clears_flags() {
    let mut chip = MockChip::new();
    chip.exchange(&[Register::FifoData.write_addr(), 0x00]).unwrap();
    chip.exchange(&[Register::Command.write_addr(), ChipCommand::CalcCrc.code()])
        .unwrap();
    chip.exchange(&[Register::DivIrq.write_addr(), 0x04]).unwrap();
    assert_eq!(chip.register(Register::DivIrq), 0x00);
}

#[test]
fn soft_reset_restores_defaults() {
    let mut chip = MockChip::new();
    chip.exchange(&[Register::Mode.write_addr(), 0x3D]).unwrap();
    chip.exchange(&[Register::Command.write_addr(), ChipCommand::SoftReset.code()])
        .unwrap();
    assert_eq!(chip.register(Register::Mode), 0x00);
    assert_eq!(chip.soft_resets, 1);
}
