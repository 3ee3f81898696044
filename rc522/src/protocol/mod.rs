// rc522/src/protocol/mod.rs

pub mod accumulator;
pub mod assembler;
pub mod checksum;
pub mod picc;

pub use accumulator::Accumulator;
pub use assembler::{UidAssembler, render_segments};
pub use checksum::{bcc, verify_bcc};
pub use picc::*;
