// rc522/src/transport/mod.rs

pub mod bitbang;
pub mod mock;
pub mod traits;

pub use bitbang::BitBangTransport;
pub use mock::{MockCard, MockChip, RecordingDelay};
pub use traits::Transport;
