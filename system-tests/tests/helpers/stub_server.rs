// system-tests/tests/helpers/stub_server.rs
// ============================================================================
// Module: Stub Task Graph Server
// Description: Minimal in-process task graph server for harness tests.
// Purpose: Serve the walker wire contract the harness consumes.
// Dependencies: axum, serde, serde_json, tokio
// ============================================================================

//! ## Overview
//! An axum server speaking the walker contract: `GET /` for liveness and
//! `POST /walker/{name}` returning reports wrapped in the
//! `{"ok": true, "data": {"reports": [...]}}` envelope. State is keyed by
//! username. A failure knob returns HTTP 500 for one named walker so suites
//! can cover the harness's failure paths.

use std::collections::HashMap;
use std::net::TcpListener as StdTcpListener;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::routing::post;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use tokio::runtime::Builder;
use tokio::sync::oneshot;

/// Labeled edge between two task nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EdgeRecord {
    from: String,
    to: String,
    label: String,
}

/// Mutable per-user graph state held by the stub.
#[derive(Debug, Clone, Default)]
struct UserGraph {
    nodes: Vec<String>,
    edges: Vec<EdgeRecord>,
    routines: Vec<String>,
    goals: u64,
    events: u64,
}

impl UserGraph {
    /// Returns a fresh graph carrying the initial `Start` node.
    fn seeded() -> Self {
        Self {
            nodes: vec!["Start".to_string()],
            ..Self::default()
        }
    }
}

/// Shared router state.
#[derive(Clone)]
struct StubState {
    users: Arc<Mutex<HashMap<String, UserGraph>>>,
    fail_walker: Option<String>,
}

/// Handle for the stub task graph server.
pub struct TaskGraphStub {
    base_url: String,
    users: Arc<Mutex<HashMap<String, UserGraph>>>,
    shutdown: Option<oneshot::Sender<()>>,
    join: Option<thread::JoinHandle<()>>,
}

impl TaskGraphStub {
    /// Returns the stub's base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the node names currently recorded for a user.
    pub fn nodes(&self, username: &str) -> Vec<String> {
        self.users.lock().map_or_else(
            |_| Vec::new(),
            |users| users.get(username).map(|graph| graph.nodes.clone()).unwrap_or_default(),
        )
    }
}

impl Drop for TaskGraphStub {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Spawns the stub task graph server on a free loopback port.
pub fn spawn_stub() -> Result<TaskGraphStub, String> {
    spawn_stub_failing(None)
}

/// Spawns a stub that returns HTTP 500 for one named walker.
pub fn spawn_stub_failing(fail_walker: Option<&str>) -> Result<TaskGraphStub, String> {
    let listener =
        StdTcpListener::bind("127.0.0.1:0").map_err(|err| format!("stub bind failed: {err}"))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("stub listener nonblocking failed: {err}"))?;
    let addr =
        listener.local_addr().map_err(|err| format!("stub local addr failed: {err}"))?;
    let base_url = format!("http://{addr}");

    let users = Arc::new(Mutex::new(HashMap::new()));
    let state = StubState {
        users: Arc::clone(&users),
        fail_walker: fail_walker.map(ToString::to_string),
    };
    let app = Router::new()
        .route("/", get(handle_root))
        .route("/walker/{walker}", post(handle_walker))
        .with_state(state);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = thread::spawn(move || {
        let runtime = match Builder::new_current_thread().enable_all().build() {
            Ok(runtime) => runtime,
            Err(error) => {
                let _ = error;
                return;
            }
        };
        runtime.block_on(async move {
            let listener = match tokio::net::TcpListener::from_std(listener) {
                Ok(listener) => listener,
                Err(error) => {
                    let _ = error;
                    return;
                }
            };
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let _ = server.await;
        });
    });
    Ok(TaskGraphStub {
        base_url,
        users,
        shutdown: Some(shutdown_tx),
        join: Some(join),
    })
}

/// Returns a loopback base URL with nothing listening on it.
pub fn dead_base_url() -> Result<String, String> {
    let listener =
        StdTcpListener::bind("127.0.0.1:0").map_err(|err| format!("bind failed: {err}"))?;
    let addr = listener.local_addr().map_err(|err| format!("local addr failed: {err}"))?;
    drop(listener);
    Ok(format!("http://{addr}"))
}

/// Serves the liveness probe.
async fn handle_root() -> &'static str {
    "ok"
}

/// Serves one walker invocation.
async fn handle_walker(
    State(state): State<StubState>,
    Path(walker): Path<String>,
    Json(params): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if state.fail_walker.as_deref() == Some(walker.as_str()) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"ok": false, "error": "injected failure"})),
        );
    }
    let username =
        params.get("username").and_then(Value::as_str).unwrap_or("anonymous").to_string();
    let Ok(mut users) = state.users.lock() else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"ok": false, "error": "stub state poisoned"})),
        );
    };
    match dispatch_walker(&walker, &params, &username, &mut users) {
        Some(report) => {
            (StatusCode::OK, Json(json!({"ok": true, "data": {"reports": [report]}})))
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"ok": false, "error": format!("unknown walker: {walker}")})),
        ),
    }
}

/// Applies a walker to the per-user state and builds its report.
fn dispatch_walker(
    walker: &str,
    params: &Value,
    username: &str,
    users: &mut HashMap<String, UserGraph>,
) -> Option<Value> {
    match walker {
        "init_user_graph" => {
            users.entry(username.to_string()).or_insert_with(UserGraph::seeded);
            Some(json!({"success": true, "report": "graph initialized"}))
        }
        "get_task_graph" => {
            let (nodes, last_task) = users.get(username).map_or_else(
                || (Vec::new(), String::new()),
                |graph| {
                    (graph.nodes.clone(), graph.nodes.last().cloned().unwrap_or_default())
                },
            );
            Some(json!({"nodes": nodes, "lastTask": last_task}))
        }
        "update_task_graph" => {
            let task = param_str(params, "task_name");
            let previous = param_str(params, "previous_task");
            let label = param_str(params, "edge_label");
            let graph = users.entry(username.to_string()).or_insert_with(UserGraph::seeded);
            if !graph.nodes.iter().any(|node| node == &task) {
                graph.nodes.push(task.clone());
            }
            graph.edges.push(EdgeRecord {
                from: previous,
                to: task,
                label,
            });
            Some(json!({"success": true, "nodes": graph.nodes}))
        }
        "rename_task" => {
            let old_name = param_str(params, "old_name");
            let new_name = param_str(params, "new_name");
            let graph = users.entry(username.to_string()).or_insert_with(UserGraph::seeded);
            for node in &mut graph.nodes {
                if *node == old_name {
                    node.clone_from(&new_name);
                }
            }
            for edge in &mut graph.edges {
                if edge.from == old_name {
                    edge.from.clone_from(&new_name);
                }
                if edge.to == old_name {
                    edge.to.clone_from(&new_name);
                }
            }
            Some(json!({"success": true}))
        }
        "clear_graph" => {
            let graph = users.entry(username.to_string()).or_insert_with(UserGraph::seeded);
            graph.nodes = vec!["Start".to_string()];
            graph.edges.clear();
            Some(json!({"success": true}))
        }
        "save_routine" => {
            let routine = param_str(params, "routine_name");
            let graph = users.entry(username.to_string()).or_insert_with(UserGraph::seeded);
            graph.routines.push(routine);
            Some(json!({"success": true}))
        }
        "load_past_routines" => {
            let routines =
                users.get(username).map(|graph| graph.routines.clone()).unwrap_or_default();
            Some(json!({"routines": routines, "count": routines.len()}))
        }
        "rebuild_graph" => {
            let nodes: Vec<String> = params
                .get("new_nodes")
                .and_then(Value::as_array)
                .map(|items| {
                    items.iter().filter_map(Value::as_str).map(ToString::to_string).collect()
                })
                .unwrap_or_default();
            let edges: Vec<EdgeRecord> = params
                .get("new_edges")
                .cloned()
                .and_then(|value| serde_json::from_value(value).ok())
                .unwrap_or_default();
            let graph = users.entry(username.to_string()).or_insert_with(UserGraph::seeded);
            graph.nodes = nodes;
            graph.edges = edges;
            Some(json!({"success": true}))
        }
        "reset_session" => {
            users.remove(username);
            Some(json!({"success": true}))
        }
        "get_session_token" => Some(json!({"key": "sess-stub-token"})),
        "get_activity_report" => {
            let events = users.get(username).map_or(0, |graph| graph.events);
            Some(json!({"events": [], "count": events}))
        }
        "calculate_productivity_metrics" => Some(json!({"completed": 0, "score": 0})),
        "get_goals" => Some(json!({"goals": []})),
        "create_goal" => {
            let graph = users.entry(username.to_string()).or_insert_with(UserGraph::seeded);
            graph.goals = graph.goals.saturating_add(1);
            Some(json!({"success": true, "goal_id": graph.goals}))
        }
        "log_activity_event" => {
            let graph = users.entry(username.to_string()).or_insert_with(UserGraph::seeded);
            graph.events = graph.events.saturating_add(1);
            Some(json!({"success": true, "event_id": graph.events}))
        }
        _ => None,
    }
}

/// Reads a string parameter, defaulting to empty.
fn param_str(params: &Value, key: &str) -> String {
    params.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}
