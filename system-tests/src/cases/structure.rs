// system-tests/src/cases/structure.rs
// ============================================================================
// Module: Graph Structure Cases
// Description: Cases covering wholesale graph replacement and session reset.
// Purpose: Exercise the structural rebuild walkers.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Cases covering wholesale graph replacement and session reset, exercising
//! the structural rebuild walkers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;

use serde_json::json;

use super::CaseContext;
use super::CaseRecorder;
use super::is_success;
use super::shape_error;

// ============================================================================
// SECTION: Cases
// ============================================================================

/// Rebuilds the graph from an explicit node and edge listing.
///
/// # Errors
///
/// Returns an error when writing console output fails.
pub async fn rebuild_graph(
    ctx: &CaseContext<'_>,
    recorder: &mut CaseRecorder<'_>,
) -> io::Result<()> {
    const NAME: &str = "Rebuild Graph";
    let params = json!({
        "new_nodes": ["Start", "TaskA", "TaskB", "TaskC"],
        "new_edges": [
            {"from": "Start", "to": "TaskA", "label": "then"},
            {"from": "TaskA", "to": "TaskB", "label": "after"},
            {"from": "TaskB", "to": "TaskC", "label": "then"},
        ],
        "username": ctx.username,
    });
    let reply = ctx.client.call_walker("rebuild_graph", params).await;
    let check = reply.first_report().and_then(|report| {
        if is_success(report) {
            Ok(())
        } else {
            Err(shape_error("expected success", report))
        }
    });
    recorder.record(NAME, check)
}

/// Resets the server-side session for this run's user.
///
/// # Errors
///
/// Returns an error when writing console output fails.
pub async fn reset_session(
    ctx: &CaseContext<'_>,
    recorder: &mut CaseRecorder<'_>,
) -> io::Result<()> {
    const NAME: &str = "Reset Session";
    let reply =
        ctx.client.call_walker("reset_session", json!({"username": ctx.username})).await;
    let check = reply.first_report().and_then(|report| {
        if is_success(report) {
            Ok(())
        } else {
            Err(shape_error("expected success", report))
        }
    });
    recorder.record(NAME, check)
}
