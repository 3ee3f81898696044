// rc522/src/service/events.rs
//! Process-wide lifecycle event queue.
//!
//! Collaborators (connectivity, time sync) announce milestones as a 16-bit
//! message with 16 bits of data, packed into one `u32` as
//! `(data << 16) | msg`. The reader driver never consumes this queue.

use log::{info, warn};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Queue depth; posting to a full queue drops the event.
pub const EVENT_QUEUE_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventMsg {
    Null,
    WifiConnected,
    WifiFailed,
    NtpTimeSynced,
    Unknown(u16),
}

impl EventMsg {
    pub const fn code(self) -> u16 {
        match self {
            EventMsg::Null => 0,
            EventMsg::WifiConnected => 1,
            EventMsg::WifiFailed => 2,
            EventMsg::NtpTimeSynced => 3,
            EventMsg::Unknown(code) => code,
        }
    }

    pub const fn from_code(code: u16) -> Self {
        match code {
            0 => EventMsg::Null,
            1 => EventMsg::WifiConnected,
            2 => EventMsg::WifiFailed,
            3 => EventMsg::NtpTimeSynced,
            other => EventMsg::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub msg: EventMsg,
    pub data: u16,
}

impl Event {
    pub const fn new(msg: EventMsg, data: u16) -> Self {
        Self { msg, data }
    }

    pub const fn pack(self) -> u32 {
        ((self.data as u32) << 16) | self.msg.code() as u32
    }

    pub const fn unpack(raw: u32) -> Self {
        Self {
            msg: EventMsg::from_code((raw & 0xffff) as u16),
            data: (raw >> 16) as u16,
        }
    }
}

/// Posting side of the queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::Sender<u32>,
}

impl EventSender {
    /// Enqueue without blocking. Returns false if the event was dropped.
    pub fn post(&self, msg: EventMsg, data: u16) -> bool {
        match self.tx.try_send(Event::new(msg, data).pack()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!("event queue full, dropping {:?}", msg);
                false
            }
            Err(TrySendError::Closed(_)) => {
                warn!("event queue closed, dropping {:?}", msg);
                false
            }
        }
    }
}

pub fn event_queue() -> (EventSender, mpsc::Receiver<u32>) {
    let (tx, rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
    (EventSender { tx }, rx)
}

/// Drain the queue until every sender is gone, logging each event.
/// Returns the events in arrival order.
pub async fn run_event_loop(mut rx: mpsc::Receiver<u32>) -> Vec<Event> {
    let mut seen = Vec::new();
    while let Some(raw) = rx.recv().await {
        let event = Event::unpack(raw);
        match event.msg {
            EventMsg::WifiConnected => info!("network connected"),
            EventMsg::WifiFailed => warn!("network connection failed"),
            EventMsg::NtpTimeSynced => info!("time synchronized"),
            EventMsg::Null => {}
            EventMsg::Unknown(code) => warn!("unknown event {} (data {})", code, event.data),
        }
        seen.push(event);
    }
    seen
}
