// system-tests/src/cases/routines.rs
// ============================================================================
// Module: Routine Cases
// Description: Cases covering routine persistence walkers.
// Purpose: Exercise saving and listing named graph snapshots.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Cases covering routine persistence walkers, exercising saving and listing
//! named graph snapshots.

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

/// Saves the current graph as a named routine.
///
/// A seed task is added first so the snapshot is non-trivial; the seed call's
/// outcome is deliberately not asserted.
///
/// # Errors
///
/// Returns an error when writing console output fails.
pub async fn save_routine(
    ctx: &CaseContext<'_>,
    recorder: &mut CaseRecorder<'_>,
) -> io::Result<()> {
    const NAME: &str = "Save Routine";
    let seed = json!({
        "task_name": "MorningExercise",
        "previous_task": "Start",
        "edge_label": "then",
        "username": ctx.username,
    });
    let _ = ctx.client.call_walker("update_task_graph", seed).await;

    let params = json!({
        "routine_name": "MorningRoutine",
        "username": ctx.username,
    });
    let reply = ctx.client.call_walker("save_routine", params).await;
    let check = reply.first_report().and_then(|report| {
        if is_success(report) {
            Ok(())
        } else {
            Err(shape_error("expected success", report))
        }
    });
    recorder.record(NAME, check)
}

/// Lists previously saved routines.
///
/// # Errors
///
/// Returns an error when writing console output fails.
pub async fn load_past_routines(
    ctx: &CaseContext<'_>,
    recorder: &mut CaseRecorder<'_>,
) -> io::Result<()> {
    const NAME: &str = "Load Past Routines";
    let reply =
        ctx.client.call_walker("load_past_routines", json!({"username": ctx.username})).await;
    let check = reply.first_report().and_then(|report| {
        if report.contains_key("routines") || report.contains_key("count") {
            Ok(())
        } else {
            Err(shape_error("expected routines data", report))
        }
    });
    recorder.record(NAME, check)
}
