// rc522/src/device/mod.rs

pub mod anticollision;
pub mod builder;
pub mod config;
pub mod handle;
pub mod registers;

pub use builder::Rc522Builder;
pub use handle::{Initialized, Rc522, Uninitialized};
pub use registers::{ChipCommand, Register};
