// system-tests/src/client/readiness.rs
// ============================================================================
// Module: Readiness Poller
// Description: Bounded liveness polling for the server under test.
// Purpose: Confirm server readiness before any case executes.
// Dependencies: tokio
// ============================================================================

//! ## Overview
//! A plain polling loop: probe the server root on a fixed one-second spacing
//! up to a configured attempt ceiling. No jitter, no backoff. Readiness
//! failure is reported as data so the runner can summarize it as a single
//! run-level failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::time::Duration;

use tokio::time::sleep;

use crate::report::ConsoleReporter;

use super::walker::WalkerClient;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Fixed spacing between liveness probes.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

// ============================================================================
// SECTION: Poller
// ============================================================================

/// Polls the server root until it reports healthy or attempts run out.
///
/// The inner result is the readiness verdict; probe failures inside the loop
/// are absorbed and retried on the fixed interval.
///
/// # Errors
///
/// Returns `Err` only when writing progress output fails.
pub async fn wait_for_server(
    client: &WalkerClient,
    console: &ConsoleReporter,
    attempts: u32,
) -> io::Result<Result<(), String>> {
    console.waiting(client.base_url())?;
    let mut attempt = 0u32;
    while attempt < attempts {
        attempt = attempt.saturating_add(1);
        if client.probe_root().await.is_ok_and(|status| status.is_success()) {
            console.ready()?;
            return Ok(Ok(()));
        }
        if attempt < attempts {
            sleep(POLL_INTERVAL).await;
        }
    }
    console.not_ready(attempts)?;
    Ok(Err(format!("server not ready after {attempts} attempts")))
}
