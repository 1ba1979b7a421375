//! Environment-sourced configuration and the construction of the
//! components it parameterizes.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use worker_models::{Address, PrimitiveError};

/// Raw CLI/env directives, parsed by `clap` before any validation.
#[derive(Parser, Debug)]
#[command(
    name = "confidential-snp-worker",
    version,
    about = "Polls a confidential-chain contract for pending SNP similarity requests and submits results via the TEE host runtime."
)]
pub struct RawConfig {
    /// The contract this worker polls and submits results to.
    #[arg(long, env = "CONTRACT_ADDRESS")]
    pub contract_address: String,

    /// Unix-domain socket path for the TEE host runtime.
    #[arg(long, env = "HOST_SOCKET_PATH")]
    pub host_socket_path: PathBuf,

    #[arg(long, env = "POLL_INTERVAL_SECONDS", default_value_t = 30)]
    pub poll_interval_seconds: u64,

    #[arg(long, env = "MAX_PARALLEL", default_value_t = 2)]
    pub max_parallel: usize,

    #[arg(long, env = "RETRY_MAX", default_value_t = 3)]
    pub retry_max: u32,

    #[arg(long, env = "RETRY_BACKOFF_BASE_MS", default_value_t = 500)]
    pub retry_backoff_base_ms: u64,

    #[arg(long, env = "REQUEST_DEADLINE_SECONDS", default_value_t = 120)]
    pub request_deadline_seconds: u64,

    /// Grace period given to in-flight analyses on shutdown.
    #[arg(long, env = "SHUTDOWN_GRACE_SECONDS", default_value_t = 60)]
    pub shutdown_grace_seconds: u64,

    /// The host-runtime method name for authenticated reads; the exact
    /// name varies by deployment, so it's read from configuration
    /// rather than hardcoded.
    #[arg(long, env = "HOST_METHOD_EVM_CALL", default_value = "eth_call")]
    pub host_method_evm_call: String,

    /// The host-runtime method name for authenticated signed-tx submission.
    #[arg(long, env = "HOST_METHOD_TX_SUBMIT", default_value = "tx.sign-submit")]
    pub host_method_tx_submit: String,

    /// Pluggable, non-critical LLM "tips" adjunct. Accepted and plumbed
    /// through configuration but never invoked by this worker; the
    /// adjunct lives outside this repository.
    #[arg(long, env = "WORKER_TIPS_ENABLED", default_value_t = false)]
    pub worker_tips_enabled: bool,
}

/// Validated configuration, ready to construct the worker's components.
pub struct WorkerConfig {
    pub contract_address: Address,
    pub host_socket_path: PathBuf,
    pub poll_interval: Duration,
    pub max_parallel: usize,
    pub retry_max: u32,
    pub retry_backoff_base: Duration,
    pub request_deadline: Duration,
    pub shutdown_grace: Duration,
    pub host_methods: worker_host_client::HostMethodNames,
    pub worker_tips_enabled: bool,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid CONTRACT_ADDRESS: {0}")]
    InvalidContractAddress(#[from] PrimitiveError),
}

impl TryFrom<RawConfig> for WorkerConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            contract_address: raw.contract_address.parse()?,
            host_socket_path: raw.host_socket_path,
            poll_interval: Duration::from_secs(raw.poll_interval_seconds),
            max_parallel: raw.max_parallel.max(1),
            retry_max: raw.retry_max,
            retry_backoff_base: Duration::from_millis(raw.retry_backoff_base_ms),
            request_deadline: Duration::from_secs(raw.request_deadline_seconds),
            shutdown_grace: Duration::from_secs(raw.shutdown_grace_seconds),
            host_methods: worker_host_client::HostMethodNames {
                read: raw.host_method_evm_call,
                write: raw.host_method_tx_submit,
            },
            worker_tips_enabled: raw.worker_tips_enabled,
        })
    }
}
