// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: Harness Test Helpers
// Description: Shared helpers for the harness integration suites.
// Purpose: Provide the in-process stub task graph server.
// Dependencies: axum, serde, serde_json, tokio
// ============================================================================

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod stub_server;
