// system-tests/src/lib.rs
// ============================================================================
// Module: Task Graph System Tests Library
// Description: Shared harness components for the task graph walker API.
// Purpose: Provide configuration, dispatch, and reporting for the runner binary.
// Dependencies: reqwest, serde_json, tokio
// ============================================================================

//! ## Overview
//! This crate hosts the integration-test harness for a remote task-graph
//! server: an HTTP walker dispatcher, a response normalizer, a readiness
//! poller, the ordered case set, and the sequencing runner used by the
//! `taskgraph-system-tests` binary.
//! Security posture: server responses are untrusted and may take any JSON
//! shape; the harness fails cases, never itself, on malformed payloads.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod cases;
pub mod client;
pub mod config;
pub mod report;
pub mod runner;

// ============================================================================
// SECTION: Tests
// ============================================================================
