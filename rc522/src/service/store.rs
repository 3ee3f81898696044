// rc522/src/service/store.rs

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

use crate::{Error, Result};

/// Depth of the request channel into the store task.
pub const STORE_CHANNEL_CAPACITY: usize = 32;

/// One row of the query-state answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardRecord {
    pub card: String,
    /// Last seen, unix seconds
    pub time: u64,
}

/// Identifier → last-seen table, ordered by identifier.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CardTable {
    entries: BTreeMap<String, u64>,
}

impl CardTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or refresh an identifier.
    pub fn upsert(&mut self, card: &str, time: u64) {
        self.entries.insert(card.to_owned(), time);
    }

    pub fn last_seen(&self, card: &str) -> Option<u64> {
        self.entries.get(card).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn records(&self) -> Vec<CardRecord> {
        self.entries
            .iter()
            .map(|(card, &time)| CardRecord {
                card: card.clone(),
                time,
            })
            .collect()
    }

    /// `[{"card":"..","time":N},...]`
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.records())?)
    }
}

enum StoreRequest {
    Record { card: String, time: u64 },
    Snapshot(oneshot::Sender<Vec<CardRecord>>),
}

/// Sole owner of the [`CardTable`]; everyone else talks to it through a
/// [`CardStoreHandle`].
pub struct CardStore {
    table: CardTable,
    rx: mpsc::Receiver<StoreRequest>,
}

impl CardStore {
    pub fn new() -> (CardStore, CardStoreHandle) {
        Self::with_table(CardTable::new())
    }

    pub fn with_table(table: CardTable) -> (CardStore, CardStoreHandle) {
        let (tx, rx) = mpsc::channel(STORE_CHANNEL_CAPACITY);
        (CardStore { table, rx }, CardStoreHandle { tx })
    }

    /// Serve requests until every handle is dropped; returns the final table.
    pub async fn run(mut self) -> CardTable {
        while let Some(req) = self.rx.recv().await {
            match req {
                StoreRequest::Record { card, time } => {
                    debug!("recording {} at {}", card, time);
                    self.table.upsert(&card, time);
                }
                StoreRequest::Snapshot(reply) => {
                    let _ = reply.send(self.table.records());
                }
            }
        }
        self.table
    }
}

#[derive(Debug, Clone)]
pub struct CardStoreHandle {
    tx: mpsc::Sender<StoreRequest>,
}

impl CardStoreHandle {
    pub async fn record(&self, card: &str, time: u64) -> Result<()> {
        self.tx
            .send(StoreRequest::Record {
                card: card.to_owned(),
                time,
            })
            .await
            .map_err(|_| Error::StoreClosed)
    }

    /// Same as [`record`](Self::record) for callers outside the runtime,
    /// such as the reader thread. Must not be called from async context.
    pub fn record_blocking(&self, card: &str, time: u64) -> Result<()> {
        self.tx
            .blocking_send(StoreRequest::Record {
                card: card.to_owned(),
                time,
            })
            .map_err(|_| Error::StoreClosed)
    }

    pub async fn snapshot(&self) -> Result<Vec<CardRecord>> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(StoreRequest::Snapshot(reply))
            .await
            .map_err(|_| Error::StoreClosed)?;
        rx.await.map_err(|_| Error::StoreClosed)
    }

    pub async fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot().await?)?)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Resolves once the store task has stopped.
    pub async fn closed(&self) {
        self.tx.closed().await
    }
}
