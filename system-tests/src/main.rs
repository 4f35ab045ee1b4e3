// system-tests/src/main.rs
// ============================================================================
// Module: Harness Entry Point
// Description: Process entry for the task graph system-test runner.
// Purpose: Map run outcomes and interrupts to process exit codes.
// Dependencies: thiserror, tokio
// ============================================================================

//! ## Overview
//! The binary loads configuration from the environment, drives the runner to
//! its terminal state, and exits 0 on all-pass, 1 on any failure or top-level
//! fault, and 130 when interrupted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::process::ExitCode;

use taskgraph_system_tests::config::HarnessConfig;
use taskgraph_system_tests::runner::Runner;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Exit code reported when the run is interrupted.
const INTERRUPT_EXIT_CODE: u8 = 130;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Top-level harness fault carrying a human-readable description.
#[derive(Debug, Error)]
#[error("{message}")]
struct HarnessError {
    /// Human-readable fault message.
    message: String,
}

impl HarnessError {
    /// Constructs a new [`HarnessError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// Harness result alias for fallible top-level operations.
type HarnessResult<T> = Result<T, HarnessError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Harness entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the harness run and maps it to an exit code.
async fn run() -> HarnessResult<ExitCode> {
    let config = HarnessConfig::load()
        .map_err(|err| HarnessError::new(format!("configuration error: {err}")))?;
    let runner = Runner::new(config).map_err(HarnessError::new)?;
    tokio::select! {
        report = runner.run() => {
            let report = report
                .map_err(|err| HarnessError::new(format!("console output failed: {err}")))?;
            if report.is_success() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        _ = tokio::signal::ctrl_c() => {
            let _ = write_stderr_line("Tests interrupted");
            Ok(ExitCode::from(INTERRUPT_EXIT_CODE))
        }
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a top-level fault to stderr and returns the failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(&format!("taskgraph-system-tests: {message}"));
    ExitCode::FAILURE
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}
