#[path = "../common/mod.rs"]
mod common;

use std::net::{IpAddr, Ipv4Addr};

use rc522::service::server::{CMD_QUERY_STATE, PING_ACK};
use rc522::service::{CardStore, ResponseServer, ServerConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

fn loopback_config() -> ServerConfig {
    ServerConfig {
        bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        ..ServerConfig::default()
    }
}

#[tokio::test]
async fn query_state_over_tcp() {
    common::init_logging();
    let (store, handle) = CardStore::new();
    tokio::spawn(store.run());
    handle.record("041a2b3c", 1_700_000_000).await.unwrap();
    handle.record("11223344556677", 1_700_000_005).await.unwrap();

    let server = ResponseServer::bind(loopback_config(), handle.clone())
        .await
        .unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.run());

    let mut client = TcpStream::connect(addr).await.unwrap();

    client.write_all(&[0x90]).await.unwrap();
    let mut ack = [0u8; 1];
    client.read_exact(&mut ack).await.unwrap();
    assert_eq!(ack[0], PING_ACK);

    client.write_all(&[CMD_QUERY_STATE]).await.unwrap();
    let expected = r#"[{"card":"041a2b3c","time":1700000000},{"card":"11223344556677","time":1700000005}]"#;
    let mut buf = vec![0u8; expected.len()];
    client.read_exact(&mut buf).await.unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), expected);

    let parsed: serde_json::Value = serde_json::from_str(expected).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn run_returns_when_store_stops_without_clients() {
    let (store, handle) = CardStore::new();
    let store_task = tokio::spawn(store.run());
    let server = ResponseServer::bind(loopback_config(), handle).await.unwrap();
    let server_task = tokio::spawn(server.run());

    store_task.abort();
    let finished = tokio::time::timeout(std::time::Duration::from_secs(2), server_task).await;
    finished
        .expect("server kept accepting after the store stopped")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn bind_gives_up_after_configured_attempts() {
    let (_store, handle) = CardStore::new();
    let taken = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .unwrap();
    let config = ServerConfig {
        port: taken.local_addr().unwrap().port(),
        bind_attempts: 2,
        retry_delay_ms: 10,
        ..loopback_config()
    };
    let result = ResponseServer::bind(config, handle).await;
    assert!(matches!(result, Err(rc522::Error::Io(_))));
}

#[test]
fn port_from_environment() {
    // SAFETY: no other test in this binary reads or writes this variable.
    unsafe { std::env::set_var("RC522_SERVER_PORT", "50123") };
    assert_eq!(ServerConfig::from_env().port, 50123);
    unsafe { std::env::set_var("RC522_SERVER_PORT", "not-a-port") };
    assert_eq!(ServerConfig::from_env().port, 50_000);
    unsafe { std::env::remove_var("RC522_SERVER_PORT") };
}
