// system-tests/src/cases/analytics.rs
// ============================================================================
// Module: Analytics Cases
// Description: Cases covering reporting, goal, and activity walkers.
// Purpose: Exercise the analytics surface of the walker API.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! The analytics fan-out applies a superficial shape check per walker (any
//! list or mapping reply passes). That is a known coverage gap in the wire
//! contract, kept deliberately shallow.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;

use serde_json::json;

use crate::client::WalkerReply;

use super::CaseContext;
use super::CaseRecorder;
use super::is_success;
use super::shape_error;

// ============================================================================
// SECTION: Cases
// ============================================================================

/// Calls each read-only analytics walker, recording one outcome per walker.
///
/// # Errors
///
/// Returns an error when writing console output fails.
pub async fn analytics_endpoints(
    ctx: &CaseContext<'_>,
    recorder: &mut CaseRecorder<'_>,
) -> io::Result<()> {
    const WALKERS: [&str; 3] =
        ["get_activity_report", "calculate_productivity_metrics", "get_goals"];
    for walker in WALKERS {
        let name = format!("Analytics: {walker}");
        let reply = ctx.client.call_walker(walker, json!({"username": ctx.username})).await;
        match reply {
            WalkerReply::Error(reason) => recorder.fail(&name, &reason)?,
            WalkerReply::List(_) | WalkerReply::Single(_) => recorder.pass(&name)?,
        }
    }
    Ok(())
}

/// Creates a productivity goal.
///
/// # Errors
///
/// Returns an error when writing console output fails.
pub async fn create_goal(
    ctx: &CaseContext<'_>,
    recorder: &mut CaseRecorder<'_>,
) -> io::Result<()> {
    const NAME: &str = "Create Goal";
    let params = json!({
        "goal_type": "daily_tasks",
        "target_value": 5,
        "username": ctx.username,
    });
    let reply = ctx.client.call_walker("create_goal", params).await;
    let check = reply.first_report().and_then(|report| {
        if is_success(report) || report.contains_key("goal_id") {
            Ok(())
        } else {
            Err(shape_error("expected success or goal_id", report))
        }
    });
    recorder.record(NAME, check)
}

/// Logs a single activity event.
///
/// # Errors
///
/// Returns an error when writing console output fails.
pub async fn log_activity_event(
    ctx: &CaseContext<'_>,
    recorder: &mut CaseRecorder<'_>,
) -> io::Result<()> {
    const NAME: &str = "Log Activity Event";
    let params = json!({
        "username": ctx.username,
        "event_type": "task_created",
        "event_data": {"task_name": "TestTask"},
        "session_id": "test-session-123",
        "task_context": "TestTask",
        "emotional_context": "neutral",
        "duration_ms": 1000,
    });
    let reply = ctx.client.call_walker("log_activity_event", params).await;
    let check = reply.first_report().and_then(|report| {
        if is_success(report) || report.contains_key("event_id") {
            Ok(())
        } else {
            Err(shape_error("expected success or event_id", report))
        }
    });
    recorder.record(NAME, check)
}
