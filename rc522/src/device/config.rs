//! MFRC522 configuration constants

/// ModWidthReg reset value (modulation width for 106 kBd Miller)
pub const MOD_WIDTH_DEFAULT: u8 = 0x26;

/// ModeReg: MSBFirst off, TxWaitRF on, CRCPreset = 01 (0x6363, ISO 14443-3 CRC_A)
pub const MODE_CRC_PRESET_6363: u8 = 0x3D;

/// TxASKReg: Force100ASK
pub const TX_ASK_FORCE_100: u8 = 0x40;

/// TxControlReg: Tx1RFEn | Tx2RFEn
pub const ANTENNA_ON: u8 = 0x03;

/// CollReg bit 7, ValuesAfterColl
pub const VALUES_AFTER_COLL: u8 = 0x80;

/// ComIrqReg: IdleIRq | RxIRq
pub const TRANSCEIVE_IRQ: u8 = 0x30;

/// Value clearing every ComIrqReg flag (Set1 = 0)
pub const COM_IRQ_CLEAR_ALL: u8 = 0x7F;

/// DivIrqReg: CRCIRq
pub const CRC_IRQ: u8 = 0x04;

/// FIFOLevelReg: FlushBuffer
pub const FIFO_FLUSH: u8 = 0x80;

/// BitFramingReg: StartSend
pub const START_SEND: u8 = 0x80;

/// Length of one bit-bang timing unit (µs)
pub const TIMING_UNIT_US: u32 = 1_000;

/// Pause between two identification attempts in the reader loop (ms)
pub const LOOP_INTERVAL_MS: u32 = 200;
