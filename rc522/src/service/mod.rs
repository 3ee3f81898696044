// rc522/src/service/mod.rs
//! Collaborators around the driver: lifecycle events, the identifier
//! table, the reader polling loop and the TCP response server.

pub mod events;
pub mod reader;
pub mod server;
pub mod store;

pub use events::{Event, EventMsg, EventSender, event_queue, run_event_loop};
pub use reader::{poll_once, run_default_reader_loop, run_reader_loop, unix_time};
pub use server::{ResponseServer, ServerConfig, handle_client};
pub use store::{CardRecord, CardStore, CardStoreHandle, CardTable};
