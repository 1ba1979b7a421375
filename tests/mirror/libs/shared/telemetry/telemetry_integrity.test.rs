// [tests/mirror/libs/shared/telemetry/telemetry_integrity.test.rs]
//! Verifies the panic hook installed by `init_tracing` actually
//! intercepts a thread collapse rather than only the default one.

use std::panic;

#[tokio::test]
async fn panic_hook_intercepts_a_thread_collapse() {
    worker_telemetry::init_tracing("telemetry-integrity-test");

    let result = panic::catch_unwind(|| {
        panic!("intentional panic for hook verification");
    });

    assert!(result.is_err(), "the panic hook must not suppress unwinding");
}
