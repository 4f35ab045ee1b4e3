// system-tests/tests/suites/dispatch.rs
// ============================================================================
// Module: Dispatcher Tests
// Description: Wire-level coverage for the walker dispatcher and poller.
// Purpose: Ensure envelopes unwrap and transport failures surface as data.
// Dependencies: taskgraph-system-tests, helpers
// ============================================================================

//! Dispatcher and readiness coverage against the in-process stub server.

use std::time::Duration;

use serde_json::json;
use taskgraph_system_tests::client::WalkerClient;
use taskgraph_system_tests::client::WalkerReply;
use taskgraph_system_tests::client::wait_for_server;
use taskgraph_system_tests::config::TestMode;
use taskgraph_system_tests::report::ConsoleReporter;

use crate::helpers::stub_server::dead_base_url;
use crate::helpers::stub_server::spawn_stub;
use crate::helpers::stub_server::spawn_stub_failing;

/// Timeout applied to dispatcher clients in this suite.
const CLIENT_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test(flavor = "multi_thread")]
async fn call_walker_unwraps_the_success_envelope() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_stub()?;
    let client = WalkerClient::new(stub.base_url().to_string(), CLIENT_TIMEOUT)?;
    let params = json!({
        "task_name": "MakeCoffee",
        "previous_task": "Start",
        "edge_label": "then",
        "username": "dispatch-user",
    });
    let reply = client.call_walker("update_task_graph", params).await;
    let report = reply.first_report()?;
    if !report.contains_key("success") {
        let keys: Vec<String> = report.keys().cloned().collect();
        return Err(format!("expected success report, got keys: {}", keys.join(", ")).into());
    }
    let nodes = stub.nodes("dispatch-user");
    if !nodes.iter().any(|node| node == "MakeCoffee") {
        return Err(format!("stub state missing MakeCoffee: {}", nodes.join(", ")).into());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_walker_surfaces_the_status_as_error() -> Result<(), Box<dyn std::error::Error>>
{
    let stub = spawn_stub()?;
    let client = WalkerClient::new(stub.base_url().to_string(), CLIENT_TIMEOUT)?;
    let reply = client.call_walker("no_such_walker", json!({})).await;
    let WalkerReply::Error(reason) = reply else {
        return Err("expected error reply for unknown walker".into());
    };
    if !reason.contains("404") {
        return Err(format!("expected 404 in reason, got: {reason}").into());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn connection_failure_surfaces_as_error_data() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = dead_base_url()?;
    let client = WalkerClient::new(base_url, CLIENT_TIMEOUT)?;
    let reply = client.call_walker("get_task_graph", json!({"username": "nobody"})).await;
    let WalkerReply::Error(reason) = reply else {
        return Err("expected error reply for dead endpoint".into());
    };
    if !reason.contains("get_task_graph") {
        return Err(format!("expected walker name in reason, got: {reason}").into());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn injected_walker_failure_fails_only_that_call() -> Result<(), Box<dyn std::error::Error>>
{
    let stub = spawn_stub_failing(Some("rename_task"))?;
    let client = WalkerClient::new(stub.base_url().to_string(), CLIENT_TIMEOUT)?;

    let reply = client
        .call_walker("rename_task", json!({"old_name": "A", "new_name": "B", "username": "u"}))
        .await;
    if !matches!(reply, WalkerReply::Error(ref reason) if reason.contains("500")) {
        return Err("expected 500-shaped error for injected failure".into());
    }

    let reply = client.call_walker("get_task_graph", json!({"username": "u"})).await;
    if reply.first_report().is_err() {
        return Err("expected other walkers to keep working".into());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn probe_root_reports_healthy_status() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_stub()?;
    let client = WalkerClient::new(stub.base_url().to_string(), CLIENT_TIMEOUT)?;
    let status = client.probe_root().await?;
    if !status.is_success() {
        return Err(format!("expected healthy status, got: {status}").into());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn readiness_succeeds_against_a_live_server() -> Result<(), Box<dyn std::error::Error>> {
    let stub = spawn_stub()?;
    let client = WalkerClient::new(stub.base_url().to_string(), CLIENT_TIMEOUT)?;
    let console = ConsoleReporter::new(TestMode::Ci);
    let verdict = wait_for_server(&client, &console, 5).await?;
    if verdict.is_err() {
        return Err("expected readiness success against live stub".into());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn readiness_exhausts_its_attempt_ceiling() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = dead_base_url()?;
    let client = WalkerClient::new(base_url, CLIENT_TIMEOUT)?;
    let console = ConsoleReporter::new(TestMode::Ci);
    let verdict = wait_for_server(&client, &console, 2).await?;
    let Err(reason) = verdict else {
        return Err("expected readiness failure against dead endpoint".into());
    };
    if !reason.contains("2 attempts") {
        return Err(format!("expected attempt count in reason, got: {reason}").into());
    }
    Ok(())
}
