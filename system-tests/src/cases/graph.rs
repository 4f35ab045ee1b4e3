// system-tests/src/cases/graph.rs
// ============================================================================
// Module: Graph Operation Cases
// Description: Cases covering graph initialization, updates, and clearing.
// Purpose: Exercise the core task graph walkers end to end.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! The graph phase builds up server-side state step by step: initialize,
//! add a task, rename it, chain more tasks, then clear. Verification cases
//! re-fetch the graph and assert over its node set.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;

use serde_json::json;

use crate::client::WalkerReply;

use super::CaseContext;
use super::CaseRecorder;
use super::is_success;
use super::node_names;
use super::render_nodes;
use super::shape_error;

// ============================================================================
// SECTION: Cases
// ============================================================================

/// Initializes the per-user graph on the server.
///
/// # Errors
///
/// Returns an error when writing console output fails.
pub async fn init_user_graph(
    ctx: &CaseContext<'_>,
    recorder: &mut CaseRecorder<'_>,
) -> io::Result<()> {
    const NAME: &str = "Init User Graph";
    let reply = ctx.client.call_walker("init_user_graph", json!({})).await;
    let check = reply.first_report().and_then(|report| {
        if report.contains_key("report")
            || report.contains_key("success")
            || report.contains_key("nodes")
        {
            Ok(())
        } else {
            Err(shape_error("expected graph report", report))
        }
    });
    recorder.record(NAME, check)
}

/// Fetches the graph for a fresh user.
///
/// Fresh users carry either no nodes at all or just the `Start` node.
///
/// # Errors
///
/// Returns an error when writing console output fails.
pub async fn get_task_graph_empty(
    ctx: &CaseContext<'_>,
    recorder: &mut CaseRecorder<'_>,
) -> io::Result<()> {
    const NAME: &str = "Get Empty Task Graph";
    let reply =
        ctx.client.call_walker("get_task_graph", json!({"username": ctx.username})).await;
    let check = reply.first_report().and_then(|report| {
        let nodes = node_names(report);
        if nodes.is_empty() || nodes.iter().any(|node| node == "Start") {
            Ok(())
        } else {
            Err(format!("unexpected nodes: {}", render_nodes(&nodes)))
        }
    });
    recorder.record(NAME, check)
}

/// Adds the first task to the graph.
///
/// # Errors
///
/// Returns an error when writing console output fails.
pub async fn update_task_graph(
    ctx: &CaseContext<'_>,
    recorder: &mut CaseRecorder<'_>,
) -> io::Result<()> {
    const NAME: &str = "Update Task Graph";
    let params = json!({
        "task_name": "MakeCoffee",
        "previous_task": "Start",
        "edge_label": "then",
        "username": ctx.username,
    });
    let reply = ctx.client.call_walker("update_task_graph", params).await;
    let check = reply.first_report().and_then(|report| {
        if is_success(report) || report.contains_key("nodes") {
            Ok(())
        } else {
            Err(shape_error("expected success", report))
        }
    });
    recorder.record(NAME, check)
}

/// Fetches the graph after the first update.
///
/// # Errors
///
/// Returns an error when writing console output fails.
pub async fn get_task_graph_with_tasks(
    ctx: &CaseContext<'_>,
    recorder: &mut CaseRecorder<'_>,
) -> io::Result<()> {
    const NAME: &str = "Get Task Graph With Tasks";
    let reply =
        ctx.client.call_walker("get_task_graph", json!({"username": ctx.username})).await;
    let check = reply.first_report().and_then(|report| {
        let nodes = node_names(report);
        if nodes.iter().any(|node| node == "MakeCoffee") {
            Ok(())
        } else {
            Err(format!("MakeCoffee not in nodes: {}", render_nodes(&nodes)))
        }
    });
    recorder.record(NAME, check)
}

/// Renames the task added by [`update_task_graph`].
///
/// # Errors
///
/// Returns an error when writing console output fails.
pub async fn rename_task(
    ctx: &CaseContext<'_>,
    recorder: &mut CaseRecorder<'_>,
) -> io::Result<()> {
    const NAME: &str = "Rename Task";
    let params = json!({
        "old_name": "MakeCoffee",
        "new_name": "BrewCoffee",
        "username": ctx.username,
    });
    let reply = ctx.client.call_walker("rename_task", params).await;
    let check = reply.first_report().and_then(|report| {
        if is_success(report) {
            Ok(())
        } else {
            Err(shape_error("expected success", report))
        }
    });
    recorder.record(NAME, check)
}

/// Verifies the rename took effect in the node set.
///
/// # Errors
///
/// Returns an error when writing console output fails.
pub async fn verify_rename(
    ctx: &CaseContext<'_>,
    recorder: &mut CaseRecorder<'_>,
) -> io::Result<()> {
    const NAME: &str = "Verify Rename";
    let reply =
        ctx.client.call_walker("get_task_graph", json!({"username": ctx.username})).await;
    let check = reply.first_report().and_then(|report| {
        let nodes = node_names(report);
        let renamed = nodes.iter().any(|node| node == "BrewCoffee");
        let stale = nodes.iter().any(|node| node == "MakeCoffee");
        if renamed && !stale {
            Ok(())
        } else {
            Err(format!(
                "expected BrewCoffee, not MakeCoffee, nodes: {}",
                render_nodes(&nodes)
            ))
        }
    });
    recorder.record(NAME, check)
}

/// Adds a chain of tasks, recording one aggregate outcome.
///
/// Only transport errors fail the chain; intermediate shapes go unchecked.
///
/// # Errors
///
/// Returns an error when writing console output fails.
pub async fn add_task_chain(
    ctx: &CaseContext<'_>,
    recorder: &mut CaseRecorder<'_>,
) -> io::Result<()> {
    const NAME: &str = "Add Multiple Tasks";
    const CHAIN: [(&str, &str, &str); 3] = [
        ("WakeUp", "Start", "then"),
        ("BrushTeeth", "WakeUp", "then"),
        ("GetDressed", "BrushTeeth", "then"),
    ];
    for (task, previous, label) in CHAIN {
        let params = json!({
            "task_name": task,
            "previous_task": previous,
            "edge_label": label,
            "username": ctx.username,
        });
        let reply = ctx.client.call_walker("update_task_graph", params).await;
        if let WalkerReply::Error(reason) = reply {
            return recorder.fail(&format!("{NAME} ({task})"), &reason);
        }
    }
    recorder.pass(NAME)
}

/// Clears the graph back to its initial shape.
///
/// # Errors
///
/// Returns an error when writing console output fails.
pub async fn clear_graph(
    ctx: &CaseContext<'_>,
    recorder: &mut CaseRecorder<'_>,
) -> io::Result<()> {
    const NAME: &str = "Clear Graph";
    let reply = ctx.client.call_walker("clear_graph", json!({"username": ctx.username})).await;
    let check = reply.first_report().and_then(|report| {
        if is_success(report) {
            Ok(())
        } else {
            Err(shape_error("expected success", report))
        }
    });
    recorder.record(NAME, check)
}

/// Verifies the cleared graph contains exactly the `Start` node.
///
/// # Errors
///
/// Returns an error when writing console output fails.
pub async fn verify_cleared(
    ctx: &CaseContext<'_>,
    recorder: &mut CaseRecorder<'_>,
) -> io::Result<()> {
    const NAME: &str = "Verify Cleared Graph";
    let reply =
        ctx.client.call_walker("get_task_graph", json!({"username": ctx.username})).await;
    let check = reply.first_report().and_then(|report| {
        let nodes = node_names(report);
        if nodes.len() == 1 && nodes[0] == "Start" {
            Ok(())
        } else {
            Err(format!("expected only Start node, got: {}", render_nodes(&nodes)))
        }
    });
    recorder.record(NAME, check)
}
