//! The polling loop and per-request state machine: for each
//! newly-observed pending id, `fetch -> analyze -> submit`, with
//! in-flight dedup, bounded concurrency, and a retry/backoff policy.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::{watch, Mutex, Semaphore};
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, error, info, instrument, warn};

use worker_contract_client::{ContractClient, ContractClientError};
use worker_models::{AnalysisResult, Uint256};

use crate::config::WorkerConfig;

const MAX_BACKOFF: Duration = Duration::from_secs(300);

/// Drives the poll loop and owns the `inFlight` deduplication set for
/// the process's lifetime; nothing here persists across restarts.
pub struct RequestProcessor {
    contract: Arc<ContractClient>,
    config: Arc<WorkerConfig>,
    in_flight: Arc<Mutex<HashSet<Uint256>>>,
    permits: Arc<Semaphore>,
}

impl RequestProcessor {
    pub fn new(contract: ContractClient, config: Arc<WorkerConfig>) -> Self {
        let permits = Arc::new(Semaphore::new(config.max_parallel));
        Self {
            contract: Arc::new(contract),
            config,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            permits,
        }
    }

    /// Runs until `shutdown` reports `true`, then stops accepting new
    /// ids and waits up to the configured grace period for in-flight
    /// analyses to unwind before returning.
    #[instrument(skip_all)]
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut consecutive_failures: u32 = 0;
        let mut tasks: JoinSet<()> = JoinSet::new();

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = tokio::time::sleep(self.config.poll_interval) => {
                    self.poll_tick(&mut consecutive_failures, &mut tasks, &shutdown).await;
                }
            }
        }

        info!(
            grace_seconds = self.config.shutdown_grace.as_secs(),
            "shutdown requested; draining in-flight analyses"
        );
        let drained = timeout(self.config.shutdown_grace, async {
            while tasks.join_next().await.is_some() {}
        })
        .await;
        if drained.is_err() {
            warn!("grace period elapsed with analyses still in flight; abandoning them");
        }
        tasks.shutdown().await;
    }

    async fn poll_tick(
        &self,
        consecutive_failures: &mut u32,
        tasks: &mut JoinSet<()>,
        shutdown: &watch::Receiver<bool>,
    ) {
        match self.contract.get_pending_requests().await {
            Ok(ids) => {
                *consecutive_failures = 0;
                self.spawn_new_work(ids, tasks, shutdown.clone()).await;
            }
            Err(err) => {
                *consecutive_failures += 1;
                let backoff = poll_backoff(*consecutive_failures);
                warn!(
                    error = %err,
                    backoff_ms = backoff.as_millis() as u64,
                    "polling pending requests failed; backing off"
                );
                tokio::time::sleep(backoff).await;
            }
        }
    }

    async fn spawn_new_work(
        &self,
        ids: Vec<Uint256>,
        tasks: &mut JoinSet<()>,
        shutdown: watch::Receiver<bool>,
    ) {
        for id in ids {
            let mut in_flight = self.in_flight.lock().await;
            if !in_flight.insert(id) {
                continue; // already in flight: skip
            }
            drop(in_flight);

            let contract = Arc::clone(&self.contract);
            let config = Arc::clone(&self.config);
            let in_flight_set = Arc::clone(&self.in_flight);
            let permits = Arc::clone(&self.permits);
            let shutdown = shutdown.clone();

            tasks.spawn(async move {
                let Ok(permit) = permits.acquire_owned().await else {
                    in_flight_set.lock().await.remove(&id);
                    return;
                };
                let deadline_hit = timeout(
                    config.request_deadline,
                    process_one(contract.as_ref(), &config, id, shutdown),
                )
                .await
                .is_err();
                drop(permit);
                if deadline_hit {
                    warn!(id = %id, "request deadline exceeded; a later poll will retry it");
                }
                in_flight_set.lock().await.remove(&id);
            });
        }
    }
}

/// `fetching -> analyzing -> submitting -> done` for a single id.
/// Every suspension point re-checks `shutdown` so a signal delivered
/// mid-analysis unwinds before `submitAnalysisResult` is ever called.
#[instrument(skip(contract, config, shutdown), fields(id = %id))]
async fn process_one(
    contract: &ContractClient,
    config: &WorkerConfig,
    id: Uint256,
    mut shutdown: watch::Receiver<bool>,
) {
    let (user1_snp, user2_snp) = match fetch_with_retry(contract, config, id, &mut shutdown).await
    {
        FetchOutcome::Data(u1, u2) => (u1, u2),
        FetchOutcome::Cancelled => return,
        FetchOutcome::Skip => {
            debug!(id = %id, "leaving id pending after a non-retryable encode issue");
            return;
        }
        FetchOutcome::MarkFailed(reason) => {
            mark_failed(contract, id, reason).await;
            return;
        }
    };

    if *shutdown.borrow() {
        return;
    }

    let analysis = match tokio::task::spawn_blocking(move || {
        worker_snp_engine::analyze(&user1_snp, &user2_snp)
    })
    .await
    {
        Ok(Ok(result)) => result,
        Ok(Err(engine_err)) => {
            mark_failed(contract, id, engine_err.to_string()).await;
            return;
        }
        Err(join_err) => {
            error!(id = %id, error = %join_err, "analysis task did not complete cleanly");
            mark_failed(contract, id, "internal analysis failure".to_string()).await;
            return;
        }
    };

    // A shutdown observed here must suppress the submission entirely.
    if *shutdown.borrow() {
        return;
    }

    submit_with_retry(contract, config, id, analysis).await;
}

enum FetchOutcome {
    Data(String, String),
    MarkFailed(String),
    Skip,
    Cancelled,
}

enum FetchErrorClass {
    Retryable,
    MarkFailed,
    Skip,
}

fn classify_fetch_error(err: &ContractClientError) -> FetchErrorClass {
    match err {
        ContractClientError::Host(_) => FetchErrorClass::Retryable,
        ContractClientError::Decode(_)
        | ContractClientError::UnexpectedShape
        | ContractClientError::StateRejection(_) => FetchErrorClass::MarkFailed,
        ContractClientError::Encode(_) => FetchErrorClass::Skip,
    }
}

async fn fetch_with_retry(
    contract: &ContractClient,
    config: &WorkerConfig,
    id: Uint256,
    shutdown: &mut watch::Receiver<bool>,
) -> FetchOutcome {
    let mut attempt = 0;
    loop {
        if *shutdown.borrow() {
            return FetchOutcome::Cancelled;
        }
        match contract.get_snp_data_for_analysis(id).await {
            Ok((user1_snp, user2_snp)) => return FetchOutcome::Data(user1_snp, user2_snp),
            Err(err) => match classify_fetch_error(&err) {
                FetchErrorClass::Retryable if attempt < config.retry_max => {
                    attempt += 1;
                    let backoff = retry_backoff(config.retry_backoff_base, attempt);
                    debug!(id = %id, attempt, error = %err, "fetch failed; retrying");
                    if wait_or_cancelled(backoff, shutdown).await {
                        return FetchOutcome::Cancelled;
                    }
                }
                FetchErrorClass::Skip => return FetchOutcome::Skip,
                _ => return FetchOutcome::MarkFailed(format!("fetch failed: {err}")),
            },
        }
    }
}

async fn submit_with_retry(
    contract: &ContractClient,
    config: &WorkerConfig,
    id: Uint256,
    analysis: AnalysisResult,
) {
    let result_json = match analysis.to_json_string() {
        Ok(json) => json,
        Err(err) => {
            mark_failed(contract, id, format!("failed to serialize result: {err}")).await;
            return;
        }
    };
    // Confidence is submitted on-chain as an integer percentage.
    let confidence_pct = (analysis.confidence * 100.0).round().clamp(0.0, 100.0) as u8;
    let relationship = analysis.relationship.clone();

    let mut attempt = 0;
    loop {
        match contract
            .submit_analysis_result(id, result_json.clone(), confidence_pct, relationship.clone())
            .await
        {
            Ok(tx_hash) => {
                info!(id = %id, tx_hash, "analysis result submitted");
                return;
            }
            Err(err) if err.is_state_rejection() => {
                // The contract already settled this id; not an error.
                info!(id = %id, "submission rejected as no-longer-pending; treating as already done");
                return;
            }
            Err(err) if attempt < config.retry_max && is_transient(&err) => {
                attempt += 1;
                let backoff = retry_backoff(config.retry_backoff_base, attempt);
                warn!(id = %id, attempt, error = %err, "submission failed; retrying");
                tokio::time::sleep(backoff).await;
            }
            Err(err) => {
                warn!(id = %id, error = %err, "submission failed permanently; marking id failed");
                mark_failed(contract, id, format!("submit failed: {err}")).await;
                return;
            }
        }
    }
}

async fn mark_failed(contract: &ContractClient, id: Uint256, reason: String) {
    match contract.mark_analysis_failed(id, reason.clone()).await {
        Ok(_) => info!(id = %id, reason, "marked analysis failed on-chain"),
        Err(err) if err.is_state_rejection() => {
            debug!(id = %id, "mark-failed rejected as no-longer-pending; already settled");
        }
        Err(err) => warn!(id = %id, error = %err, "failed to record failure on-chain; releasing id for a later poll"),
    }
}

fn is_transient(err: &ContractClientError) -> bool {
    matches!(err, ContractClientError::Host(_))
}

async fn wait_or_cancelled(duration: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(duration) => false,
        changed = shutdown.changed() => changed.is_err() || *shutdown.borrow(),
    }
}

fn poll_backoff(consecutive_failures: u32) -> Duration {
    jittered(exponential(Duration::from_secs(1), consecutive_failures))
}

fn retry_backoff(base: Duration, attempt: u32) -> Duration {
    jittered(exponential(base, attempt))
}

fn exponential(base: Duration, exponent: u32) -> Duration {
    let factor = 2u32.saturating_pow(exponent.min(16));
    base.saturating_mul(factor).min(MAX_BACKOFF)
}

fn jittered(duration: Duration) -> Duration {
    let millis = (duration.as_millis() as u64).max(1);
    let spread = (millis / 4).max(1);
    let jitter = rand::thread_rng().gen_range(0..=spread);
    Duration::from_millis(millis + jitter)
}
