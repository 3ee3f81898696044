// rc522/src/service/reader.rs
//! The reader's dedicated polling loop.
//!
//! The driver is blocking, so this runs on its own thread (or
//! `spawn_blocking`) and hands identifiers to the store over its channel.

use std::time::{SystemTime, UNIX_EPOCH};

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::constants::UID_HEX_CAPACITY;
use crate::device::config::LOOP_INTERVAL_MS;
use crate::device::{Initialized, Rc522};
use crate::service::store::CardStoreHandle;
use crate::transport::Transport;
use crate::{Error, Result};

/// Current wall-clock time in unix seconds (0 if the clock is before 1970,
/// i.e. not yet synchronized).
pub fn unix_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// One identification attempt. On success the identifier is recorded with
/// the current time and returned; a cycle without a card touches nothing.
pub fn poll_once<T, D>(
    reader: &mut Rc522<T, D, Initialized>,
    store: &CardStoreHandle,
) -> Result<Option<String>>
where
    T: Transport,
    D: DelayNs,
{
    let mut out = [0u8; UID_HEX_CAPACITY];
    if !reader.acquire_identifier(&mut out) {
        return Ok(None);
    }
    let len = out.iter().position(|&b| b == 0).unwrap_or(out.len());
    let card = String::from_utf8_lossy(&out[..len]).into_owned();
    store.record_blocking(&card, unix_time())?;
    Ok(Some(card))
}

/// Poll forever at `interval_ms`, until the store goes away.
pub fn run_reader_loop<T, D>(
    mut reader: Rc522<T, D, Initialized>,
    store: CardStoreHandle,
    interval_ms: u32,
) -> Result<Rc522<T, D, Initialized>>
where
    T: Transport,
    D: DelayNs,
{
    match reader.read_chip_version() {
        Ok(v) => info!("reader chip version {:#04x}", v),
        Err(e) => warn!("could not read chip version: {}", e),
    }

    loop {
        if store.is_closed() {
            break;
        }
        match poll_once(&mut reader, &store) {
            Ok(_) => {}
            Err(Error::StoreClosed) => break,
            Err(e) => return Err(e),
        }
        reader.idle(interval_ms);
    }
    info!("card store closed, reader loop stopped");
    Ok(reader)
}

/// [`run_reader_loop`] with the default 200 ms pacing.
pub fn run_default_reader_loop<T, D>(
    reader: Rc522<T, D, Initialized>,
    store: CardStoreHandle,
) -> Result<Rc522<T, D, Initialized>>
where
    T: Transport,
    D: DelayNs,
{
    run_reader_loop(reader, store, LOOP_INTERVAL_MS)
}
