// [tests/mirror/libs/infra/host_client/protocol.test.rs]
//! Exercises `HostClient` against a real Unix-domain socket speaking
//! the line-delimited JSON protocol, standing in for the TEE host.

use std::time::Duration;

use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixListener;
use worker_host_client::{HostClient, HostMethodNames};
use worker_models::Address;

fn socket_path() -> std::path::PathBuf {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("host.sock");
    std::mem::forget(dir); // keep the directory alive for the socket's lifetime
    path
}

#[tokio::test]
async fn eth_call_round_trips_through_the_socket() {
    let path = socket_path();
    let listener = UnixListener::bind(&path).expect("bind host socket");

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let (reader, mut writer) = stream.into_split();
        let mut reader = BufReader::new(reader);
        let mut line = String::new();
        reader.read_line(&mut line).await.expect("read request");
        assert!(line.contains("\"method\":\"eth_call\""));

        let response = json!({ "result": "0x1234" }).to_string();
        writer.write_all(response.as_bytes()).await.expect("write response");
        writer.write_all(b"\n").await.expect("write newline");
    });

    let client = HostClient::new(path, HostMethodNames::default(), Duration::from_secs(5));
    let result = client
        .eth_call(Address::zero(), &[0xAA, 0xBB])
        .await
        .expect("eth_call should succeed");

    assert_eq!(result, vec![0x12, 0x34]);
    server.await.expect("server task");
}

#[tokio::test]
async fn host_error_response_maps_to_host_error() {
    let path = socket_path();
    let listener = UnixListener::bind(&path).expect("bind host socket");

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let (reader, mut writer) = stream.into_split();
        let mut reader = BufReader::new(reader);
        let mut line = String::new();
        reader.read_line(&mut line).await.expect("read request");

        let response = json!({ "error": { "code": -32000, "message": "not pending" } }).to_string();
        writer.write_all(response.as_bytes()).await.expect("write response");
        writer.write_all(b"\n").await.expect("write newline");
    });

    let client = HostClient::new(path, HostMethodNames::default(), Duration::from_secs(5));
    let err = client
        .eth_call(Address::zero(), &[])
        .await
        .expect_err("host error should surface");

    match err {
        worker_host_client::HostClientError::HostError { code, message } => {
            assert_eq!(code, -32000);
            assert_eq!(message, "not pending");
        }
        other => panic!("expected HostError, got {other:?}"),
    }
    server.await.expect("server task");
}

#[tokio::test]
async fn unreachable_socket_maps_to_host_unavailable() {
    let path = socket_path(); // nothing ever binds this path
    let client = HostClient::new(path, HostMethodNames::default(), Duration::from_secs(1));
    let err = client
        .eth_call(Address::zero(), &[])
        .await
        .expect_err("connecting to a dead socket should fail");

    assert!(matches!(
        err,
        worker_host_client::HostClientError::HostUnavailable(_)
    ));
}
