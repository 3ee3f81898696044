// Shared helpers for integration tests. Each aggregator pulls this in with
// `#[path]`, so not every helper is used by every test crate.
#![allow(dead_code)]


use rc522::transport::mock::RecordingDelay;

/// Install env_logger once so `RUST_LOG=debug cargo test` shows chip dumps.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Interpret a NUL-terminated identifier buffer.
pub fn buffer_str(out: &[u8]) -> &str {
    let len = out.iter().position(|&b| b == 0).unwrap_or(out.len());
    std::str::from_utf8(&out[..len]).unwrap()
}

pub fn waited_ms(delay: &RecordingDelay) -> u64 {
    delay.total_ms()
}
