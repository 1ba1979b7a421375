//! Structured logging init and panic capture for the worker binary.
//!
//! Log level is controlled by `WORKER_LOG` (an `EnvFilter` directive
//! string, e.g. `worker=debug,worker_host_client=info`), falling back
//! to `info` for this service and `warn` for everything else. Output
//! format is human-readable by default; set `WORKER_LOG_FORMAT=json`
//! for newline-delimited JSON suitable for log aggregation.

use std::panic;

use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the global tracing subscriber and panic hook. Must be
/// called once, near the top of `main`.
///
/// # Panics
/// Panics if a global subscriber has already been installed.
pub fn init_tracing(service_name: &str) {
    let filter = EnvFilter::try_from_env("WORKER_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("{service_name}=info,warn")));

    let json_output = std::env::var("WORKER_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_output {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().flatten_event(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_target(false))
            .init();
    }

    install_panic_hook(service_name);

    tracing::info!(service = service_name, "telemetry initialized");
}

/// Records panics via `tracing::error!` instead of letting them only
/// reach stderr, so a panic in a spawned task still shows up in the
/// configured log sink before the task's `JoinHandle` reports it.
fn install_panic_hook(service_name: &str) {
    let service_name = service_name.to_string();
    panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());

        let message = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("non-string panic payload");

        error!(service = %service_name, location = %location, "panic: {message}");
    }));
}
