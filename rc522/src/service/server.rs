// rc522/src/service/server.rs
//! Byte-command TCP server exposing the identifier table.
//!
//! Clients send single bytes. Bytes without the high bit are ignored, the
//! query-state byte is answered with the JSON table, and any other high-bit
//! byte is a liveness ping answered with a one-byte acknowledgement.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::service::store::CardStoreHandle;
use crate::{Error, Result};

pub const DEFAULT_PORT: u16 = 50_000;
pub const CMD_QUERY_STATE: u8 = 225;
pub const PING_ACK: u8 = 0x01;
pub const BIND_ATTEMPTS: u32 = 5;
pub const BIND_RETRY_DELAY_MS: u64 = 8_000;
/// Pause after a failed accept, e.g. when the process is out of descriptors.
pub const ACCEPT_BACKOFF_MS: u64 = 100;

/// Environment variable overriding [`ServerConfig::port`].
pub const PORT_ENV: &str = "RC522_SERVER_PORT";

const COMMAND_BIT: u8 = 0x80;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_address: IpAddr,
    pub port: u16,
    pub query_state_cmd: u8,
    pub ping_ack: u8,
    pub bind_attempts: u32,
    pub retry_delay_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            query_state_cmd: CMD_QUERY_STATE,
            ping_ack: PING_ACK,
            bind_attempts: BIND_ATTEMPTS,
            retry_delay_ms: BIND_RETRY_DELAY_MS,
        }
    }
}

impl ServerConfig {
    /// Defaults, with the port taken from `RC522_SERVER_PORT` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(PORT_ENV) {
            match raw.trim().parse() {
                Ok(port) => config.port = port,
                Err(_) => warn!("ignoring invalid {}={:?}", PORT_ENV, raw),
            }
        }
        config
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

pub struct ResponseServer {
    listener: TcpListener,
    config: ServerConfig,
    store: CardStoreHandle,
}

impl ResponseServer {
    /// Bind the listening socket, retrying `bind_attempts` times.
    pub async fn bind(config: ServerConfig, store: CardStoreHandle) -> Result<Self> {
        let addr = config.socket_addr();
        let mut attempt = 0;
        loop {
            attempt += 1;
            match TcpListener::bind(addr).await {
                Ok(listener) => {
                    info!("response server listening on {}", listener.local_addr()?);
                    return Ok(Self {
                        listener,
                        config,
                        store,
                    });
                }
                Err(e) if attempt < config.bind_attempts => {
                    warn!(
                        "bind {} failed ({}), retry {}/{}",
                        addr, e, attempt, config.bind_attempts
                    );
                    tokio::time::sleep(Duration::from_millis(config.retry_delay_ms)).await;
                }
                Err(e) => {
                    error!("bind {} failed after {} attempts: {}", addr, attempt, e);
                    return Err(Error::Io(e));
                }
            }
        }
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept clients until the store is closed. Each client gets its own
    /// task.
    pub async fn run(self) -> Result<()> {
        loop {
            let accepted = tokio::select! {
                _ = self.store.closed() => break,
                accepted = self.listener.accept() => accepted,
            };
            let (stream, peer) = match accepted {
                Ok(conn) => conn,
                Err(e) => {
                    error!("accept failed: {}", e);
                    tokio::time::sleep(Duration::from_millis(ACCEPT_BACKOFF_MS)).await;
                    continue;
                }
            };
            info!("client {} connected", peer);
            let config = self.config.clone();
            let store = self.store.clone();
            tokio::spawn(async move {
                match handle_client(stream, &config, &store).await {
                    Ok(()) => info!("client {} disconnected", peer),
                    Err(e) => warn!("client {} dropped: {}", peer, e),
                }
            });
        }
        info!("card store closed, response server stopping");
        Ok(())
    }
}

/// Serve one client until it closes the connection.
pub async fn handle_client<S>(
    mut stream: S,
    config: &ServerConfig,
    store: &CardStoreHandle,
) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut byte = [0u8; 1];
    loop {
        if stream.read(&mut byte).await? == 0 {
            return Ok(());
        }
        let cmd = byte[0];
        if cmd & COMMAND_BIT == 0 {
            continue;
        }
        if cmd == config.query_state_cmd {
            let json = store.snapshot_json().await?;
            debug!("query state -> {} bytes", json.len());
            stream.write_all(json.as_bytes()).await?;
        } else {
            stream.write_all(&[config.ping_ack]).await?;
        }
        stream.flush().await?;
    }
}
