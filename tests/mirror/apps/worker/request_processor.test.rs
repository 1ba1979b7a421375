//! End-to-end exercise of the request processor against a fake TEE
//! host speaking the real wire protocol: a "not pending" submission
//! rejection must be treated as done, not failed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

use worker_abi_codec::{encode_args, selector, signatures, AbiValue};
use worker_contract_client::ContractClient;
use worker_host_client::{HostClient, HostMethodNames, DEFAULT_CALL_DEADLINE};
use worker_lib::{RequestProcessor, WorkerConfig};
use worker_models::{Address, Uint256};

fn synthetic_dataset(seed: u64, n: usize) -> String {
    let mut out = String::new();
    let alleles = ['A', 'C', 'G', 'T'];
    for i in 0..n {
        let a = alleles[((seed + i as u64) % 4) as usize];
        let b = alleles[((seed + i as u64 + 1) % 4) as usize];
        out.push_str(&format!("rs{i}\tchr1\t{}\t{}{}\n", 1000 + i, a, b));
    }
    out
}

struct FakeHost {
    submit_calls: Arc<AtomicUsize>,
    mark_failed_calls: Arc<AtomicUsize>,
}

fn spawn_fake_host(socket_path: std::path::PathBuf, reject_submission: bool) -> FakeHost {
    let submit_calls = Arc::new(AtomicUsize::new(0));
    let mark_failed_calls = Arc::new(AtomicUsize::new(0));
    // Flips false the moment a submission is attempted, so a later poll
    // no longer sees id 1 as pending — mirrors the real contract, which
    // stops returning an id from getPendingRequests once a submission
    // for it has been attempted.
    let still_pending = Arc::new(std::sync::atomic::AtomicBool::new(true));
    let submit_calls_task = Arc::clone(&submit_calls);
    let mark_failed_calls_task = Arc::clone(&mark_failed_calls);
    let still_pending_task = Arc::clone(&still_pending);

    let listener = UnixListener::bind(&socket_path).expect("bind fake host socket");

    tokio::spawn(async move {
        loop {
            let (stream, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => return,
            };
            tokio::spawn(handle_connection(
                stream,
                Arc::clone(&submit_calls_task),
                Arc::clone(&mark_failed_calls_task),
                Arc::clone(&still_pending_task),
                reject_submission,
            ));
        }
    });

    FakeHost { submit_calls, mark_failed_calls }
}

async fn handle_connection(
    stream: UnixStream,
    submit_calls: Arc<AtomicUsize>,
    mark_failed_calls: Arc<AtomicUsize>,
    still_pending: Arc<std::sync::atomic::AtomicBool>,
    reject_submission: bool,
) {
    let (reader_half, mut writer_half) = stream.into_split();
    let mut reader = BufReader::new(reader_half);
    let mut line = String::new();
    if reader.read_line(&mut line).await.unwrap_or(0) == 0 {
        return;
    }
    let request: Value = match serde_json::from_str(line.trim_end()) {
        Ok(value) => value,
        Err(_) => return,
    };
    let method = request["method"].as_str().unwrap_or_default();
    let response = match method {
        "eth_call" => handle_eth_call(&request, &still_pending),
        "tx.sign-submit" => handle_sign_submit(
            &request,
            &submit_calls,
            &mark_failed_calls,
            &still_pending,
            reject_submission,
        ),
        other => json!({"error": {"code": -32601, "message": format!("unknown method {other}")}}),
    };
    let mut out = serde_json::to_string(&response).unwrap();
    out.push('\n');
    let _ = writer_half.write_all(out.as_bytes()).await;
}

fn decode_calldata(request: &Value) -> Vec<u8> {
    let data_hex = request["params"][0]["data"]
        .as_str()
        .or_else(|| request["params"]["data"].as_str())
        .expect("request carries calldata");
    hex::decode(data_hex.trim_start_matches("0x")).expect("valid hex calldata")
}

fn selector_of(calldata: &[u8]) -> [u8; 4] {
    calldata[..4].try_into().expect("calldata has a 4-byte selector")
}

fn handle_eth_call(request: &Value, still_pending: &std::sync::atomic::AtomicBool) -> Value {
    let calldata = decode_calldata(request);
    let sel = selector_of(&calldata);

    let payload = if sel == selector(signatures::GET_PENDING_REQUESTS) {
        let ids = if still_pending.load(Ordering::SeqCst) {
            vec![Uint256::from_u64(1)]
        } else {
            vec![]
        };
        encode_args(&[AbiValue::Uint256Array(ids)])
    } else if sel == selector(signatures::GET_SNP_DATA_FOR_ANALYSIS) {
        let user1 = synthetic_dataset(0, 150);
        let user2 = synthetic_dataset(0, 150);
        encode_args(&[AbiValue::Str(user1), AbiValue::Str(user2)])
    } else {
        return json!({"error": {"code": -32000, "message": "unexpected eth_call"}});
    };
    json!({"result": format!("0x{}", hex::encode(payload))})
}

fn handle_sign_submit(
    request: &Value,
    submit_calls: &Arc<AtomicUsize>,
    mark_failed_calls: &Arc<AtomicUsize>,
    still_pending: &std::sync::atomic::AtomicBool,
    reject_submission: bool,
) -> Value {
    let calldata = decode_calldata(request);
    let sel = selector_of(&calldata);

    if sel == selector(signatures::SUBMIT_ANALYSIS_RESULT) {
        submit_calls.fetch_add(1, Ordering::SeqCst);
        still_pending.store(false, Ordering::SeqCst);
        if reject_submission {
            return json!({"error": {"code": -32000, "message": "Request not pending"}});
        }
        return json!({"result": {"hash": "0xabc"}});
    }
    if sel == selector(signatures::MARK_ANALYSIS_FAILED) {
        mark_failed_calls.fetch_add(1, Ordering::SeqCst);
        still_pending.store(false, Ordering::SeqCst);
        return json!({"result": {"hash": "0xdef"}});
    }
    json!({"error": {"code": -32000, "message": "unexpected write call"}})
}

fn test_socket_path() -> std::path::PathBuf {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("host.sock");
    std::mem::forget(dir);
    path
}

fn test_config(socket_path: std::path::PathBuf) -> WorkerConfig {
    WorkerConfig {
        contract_address: Address::zero(),
        host_socket_path: socket_path,
        poll_interval: Duration::from_millis(20),
        max_parallel: 2,
        retry_max: 1,
        retry_backoff_base: Duration::from_millis(10),
        request_deadline: Duration::from_secs(5),
        shutdown_grace: Duration::from_millis(500),
        host_methods: HostMethodNames::default(),
        worker_tips_enabled: false,
    }
}

#[tokio::test]
async fn host_rejection_of_a_valid_submission_is_treated_as_done_not_failed() {
    let socket_path = test_socket_path();
    let fake_host = spawn_fake_host(socket_path.clone(), true);
    tokio::time::sleep(Duration::from_millis(50)).await;

    let config = Arc::new(test_config(socket_path.clone()));
    let host = HostClient::new(socket_path, config.host_methods.clone(), DEFAULT_CALL_DEADLINE);
    let contract = ContractClient::new(host, config.contract_address);
    let processor = RequestProcessor::new(contract, Arc::clone(&config));

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let run_handle = tokio::spawn(async move {
        processor.run(shutdown_rx).await;
    });

    tokio::time::sleep(Duration::from_millis(300)).await;
    let _ = shutdown_tx.send(true);
    run_handle.await.expect("processor task did not panic");

    assert_eq!(fake_host.submit_calls.load(Ordering::SeqCst), 1);
    assert_eq!(fake_host.mark_failed_calls.load(Ordering::SeqCst), 0);
}
