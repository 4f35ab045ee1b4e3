// system-tests/src/report/mod.rs
// ============================================================================
// Module: Run Reporting
// Description: Result accumulation and console output for harness runs.
// Purpose: Keep pass/fail accounting explicit and output styling injectable.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The accumulator is an owned value threaded through the runner; nothing is
//! ambient or static. Console styling is selected once from the configured
//! test mode and injected into the runner as a reporter capability.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod console;
mod summary;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use console::ConsoleReporter;
pub use console::Palette;
pub use summary::CaseFailure;
pub use summary::RunSummary;
