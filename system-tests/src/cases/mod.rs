// system-tests/src/cases/mod.rs
// ============================================================================
// Module: Test Case Set
// Description: Ordered integration cases against the walker API.
// Purpose: Provide case context, outcome recording, and shared shape checks.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Each case is a named, stateless function that dispatches one or a short
//! sequence of walker calls with fixed literal parameters and applies
//! shape-tolerant checks to the normalized reply. Cases are order-sensitive:
//! later cases assume state produced by earlier ones. A transport error fails
//! a case immediately with the raw error text, before any shape check.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod analytics;
pub mod graph;
pub mod routines;
pub mod session;
pub mod structure;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;

use serde_json::Map;
use serde_json::Value;

use crate::client::WalkerClient;
use crate::client::is_truthy;
use crate::report::ConsoleReporter;
use crate::report::RunSummary;

// ============================================================================
// SECTION: Case Context
// ============================================================================

/// Shared inputs for a single case.
pub struct CaseContext<'run> {
    /// Walker client for the server under test.
    pub client: &'run WalkerClient,
    /// Unique username scoping this run's server-side state.
    pub username: &'run str,
}

/// Couples the accumulator and the reporter for case outcomes.
pub struct CaseRecorder<'run> {
    /// Accumulator owned by the runner.
    summary: &'run mut RunSummary,
    /// Reporter writing per-case lines.
    console: &'run ConsoleReporter,
}

impl<'run> CaseRecorder<'run> {
    /// Creates a recorder over the run accumulator and reporter.
    pub fn new(summary: &'run mut RunSummary, console: &'run ConsoleReporter) -> Self {
        Self {
            summary,
            console,
        }
    }

    /// Records and reports a passing case.
    ///
    /// # Errors
    ///
    /// Returns an error when writing console output fails.
    pub fn pass(&mut self, name: &str) -> io::Result<()> {
        self.summary.add_pass();
        self.console.pass(name)
    }

    /// Records and reports a failing case.
    ///
    /// # Errors
    ///
    /// Returns an error when writing console output fails.
    pub fn fail(&mut self, name: &str, reason: &str) -> io::Result<()> {
        self.summary.add_fail(name, reason);
        self.console.fail(name, reason)
    }

    /// Reports a skipped case without touching the counters.
    ///
    /// # Errors
    ///
    /// Returns an error when writing console output fails.
    pub fn skip(&self, name: &str, reason: &str) -> io::Result<()> {
        self.console.skip(name, reason)
    }

    /// Records the outcome of a shape check.
    ///
    /// # Errors
    ///
    /// Returns an error when writing console output fails.
    pub fn record(&mut self, name: &str, check: Result<(), String>) -> io::Result<()> {
        match check {
            Ok(()) => self.pass(name),
            Err(reason) => self.fail(name, &reason),
        }
    }
}

// ============================================================================
// SECTION: Shape Helpers
// ============================================================================

/// True when the report carries a truthy `success` flag.
pub(crate) fn is_success(report: &Map<String, Value>) -> bool {
    report.get("success").is_some_and(is_truthy)
}

/// Extracts the string entries under the report's `nodes` key.
pub(crate) fn node_names(report: &Map<String, Value>) -> Vec<String> {
    report
        .get("nodes")
        .and_then(Value::as_array)
        .map(|items| {
            items.iter().filter_map(Value::as_str).map(ToString::to_string).collect()
        })
        .unwrap_or_default()
}

/// Renders a node list for failure messages.
pub(crate) fn render_nodes(nodes: &[String]) -> String {
    format!("[{}]", nodes.join(", "))
}

/// Builds a shape-mismatch reason embedding the actual report.
pub(crate) fn shape_error(expectation: &str, report: &Map<String, Value>) -> String {
    format!("{expectation}, got: {}", Value::Object(report.clone()))
}
