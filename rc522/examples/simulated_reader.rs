// Simulated reader demo
//
// Runs the full stack (reader loop, card table, response server) against a
// simulated MFRC522 with one card in the field. Query it with e.g.
//
//     printf '\xe1' | nc -q1 127.0.0.1 50000
//
// RUST_LOG=debug shows the chip traffic; RC522_SERVER_PORT changes the port.

use std::time::Duration;

use embedded_hal::delay::DelayNs;
use rc522::prelude::*;
use rc522::service::{CardStore, run_default_reader_loop};
use rc522::transport::mock::{MockCard, MockChip};

/// Delay backed by the OS scheduler.
struct ThreadDelay;

impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(ns as u64));
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let chip = MockChip::with_card(MockCard::new(&[0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77], 0x08));
    let reader = Rc522Builder::new()
        .with_transport(chip)
        .with_delay(ThreadDelay)
        .with_poll_policy(PollPolicy::new(1, 50))
        .build()?;

    let (store, handle) = CardStore::new();
    let store_task = tokio::spawn(store.run());

    let server = ResponseServer::bind(ServerConfig::from_env(), handle.clone()).await?;
    println!("listening on {}", server.local_addr()?);
    tokio::spawn(server.run());

    let reader_handle = handle.clone();
    let reader_thread = std::thread::spawn(move || run_default_reader_loop(reader, reader_handle));

    tokio::time::sleep(Duration::from_secs(10)).await;
    for record in handle.snapshot().await? {
        println!("{} last seen at {}", record.card, record.time);
    }

    // closing the table stops the reader loop
    store_task.abort();
    let _ = store_task.await;
    match reader_thread.join() {
        Ok(result) => {
            result?;
        }
        Err(_) => anyhow::bail!("reader thread panicked"),
    }
    Ok(())
}
