//! Entry point: parse configuration, wire up the host/contract clients,
//! and hand control to the request processor until a shutdown signal
//! arrives.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, warn};

use worker_contract_client::ContractClient;
use worker_host_client::{HostClient, DEFAULT_CALL_DEADLINE};
use worker_lib::{RawConfig, RequestProcessor, WorkerConfig};

const HOST_REACHABILITY_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    worker_telemetry::init_tracing("worker");

    let raw = RawConfig::parse();
    let config = match WorkerConfig::try_from(raw) {
        Ok(config) => Arc::new(config),
        Err(err) => {
            error!(error = %err, "invalid configuration; refusing to start");
            return ExitCode::from(2);
        }
    };

    check_host_reachability(&config.host_socket_path).await;

    let host = HostClient::new(
        config.host_socket_path.clone(),
        config.host_methods.clone(),
        DEFAULT_CALL_DEADLINE,
    );
    let contract = ContractClient::new(host, config.contract_address);
    let processor = RequestProcessor::new(contract, Arc::clone(&config));

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("shutdown signal received; finishing in-flight analyses");
            let _ = shutdown_tx.send(true);
        }
    });

    info!(
        contract = %config.contract_address,
        poll_interval_secs = config.poll_interval.as_secs(),
        max_parallel = config.max_parallel,
        "worker starting"
    );

    processor.run(shutdown_rx).await;

    info!("worker stopped");
    ExitCode::SUCCESS
}

/// Soft-fails: logs a warning and lets the poll loop's own backoff take
/// over rather than exiting on a cold host.
async fn check_host_reachability(socket_path: &std::path::Path) {
    let outcome = tokio::time::timeout(
        HOST_REACHABILITY_CHECK_TIMEOUT,
        tokio::net::UnixStream::connect(socket_path),
    )
    .await;
    match outcome {
        Ok(Ok(_)) => info!(path = %socket_path.display(), "host runtime socket is reachable"),
        Ok(Err(err)) => {
            warn!(path = %socket_path.display(), error = %err, "host runtime socket is not reachable yet; continuing")
        }
        Err(_) => {
            warn!(path = %socket_path.display(), "host runtime reachability check timed out; continuing")
        }
    }
}
