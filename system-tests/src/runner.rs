// system-tests/src/runner.rs
// ============================================================================
// Module: Harness Runner
// Description: Sequencing state machine for a full harness run.
// Purpose: Drive readiness, the ordered case phases, and the final summary.
// Dependencies: tokio
// ============================================================================

//! ## Overview
//! A run moves through `NotStarted -> WaitingForServer -> HealthChecked ->
//! RunningCases -> Summarized`. Readiness failure is terminal before any case
//! executes and is summarized as a single run-level failure. Cases execute
//! strictly sequentially in a fixed, hand-ordered sequence grouped into named
//! phases; the run always terminates at `Summarized`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use crate::cases::CaseContext;
use crate::cases::CaseRecorder;
use crate::cases::analytics;
use crate::cases::graph;
use crate::cases::routines;
use crate::cases::session;
use crate::cases::structure;
use crate::client::WalkerClient;
use crate::client::wait_for_server;
use crate::config::HarnessConfig;
use crate::report::ConsoleReporter;
use crate::report::RunSummary;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Lifecycle states of a harness run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    /// No run activity yet.
    NotStarted,
    /// Polling the liveness endpoint.
    WaitingForServer,
    /// Readiness confirmed; health case pending or recorded.
    HealthChecked,
    /// Executing the ordered case phases.
    RunningCases,
    /// Terminal state; the summary has been written.
    Summarized,
}

/// Final report of a harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Accumulated case outcomes.
    pub summary: RunSummary,
    /// Whether the readiness poll confirmed the server.
    pub ready: bool,
}

impl RunReport {
    /// True when the server was ready and no case failed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.ready && self.summary.is_success()
    }
}

/// Sequences readiness, the case phases, and the final summary.
pub struct Runner {
    /// Loaded harness configuration.
    config: HarnessConfig,
    /// Walker client for the server under test.
    client: WalkerClient,
    /// Injected console reporter.
    console: ConsoleReporter,
    /// Unique username scoping this run's server-side state.
    username: String,
    /// Current lifecycle state.
    state: RunnerState,
}

// ============================================================================
// SECTION: Runner
// ============================================================================

impl Runner {
    /// Creates a runner from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the walker client cannot be built.
    pub fn new(config: HarnessConfig) -> Result<Self, String> {
        let client = WalkerClient::new(config.base_url.clone(), config.request_timeout)?;
        let console = ConsoleReporter::new(config.mode);
        let username = format!("test_user_{}", unix_seconds());
        Ok(Self {
            config,
            client,
            console,
            username,
            state: RunnerState::NotStarted,
        })
    }

    /// Returns this run's unique username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> RunnerState {
        self.state
    }

    /// Executes the full run to its terminal state.
    ///
    /// # Errors
    ///
    /// Returns an error only when writing console output fails; case and
    /// readiness failures are reported through the returned [`RunReport`].
    pub async fn run(mut self) -> io::Result<RunReport> {
        let mut summary = RunSummary::new();
        self.console.banner(self.client.base_url(), &self.username)?;

        self.state = RunnerState::WaitingForServer;
        let readiness =
            wait_for_server(&self.client, &self.console, self.config.ready_attempts).await?;
        if let Err(reason) = readiness {
            let mut recorder = CaseRecorder::new(&mut summary, &self.console);
            recorder.fail("Server Startup", &reason)?;
            self.state = RunnerState::Summarized;
            self.console.summary(&summary)?;
            return Ok(RunReport {
                summary,
                ready: false,
            });
        }
        self.state = RunnerState::HealthChecked;

        if self.health_check(&mut summary).await? {
            self.state = RunnerState::RunningCases;
            self.run_cases(&mut summary).await?;
        }
        self.state = RunnerState::Summarized;
        self.console.summary(&summary)?;
        Ok(RunReport {
            summary,
            ready: true,
        })
    }

    /// Records the health-check case; false aborts the case phases.
    async fn health_check(&self, summary: &mut RunSummary) -> io::Result<bool> {
        const NAME: &str = "Server Health Check";
        let mut recorder = CaseRecorder::new(summary, &self.console);
        match self.client.probe_root().await {
            Ok(status) if status.is_success() => {
                recorder.pass(NAME)?;
                Ok(true)
            }
            Ok(status) => {
                recorder.fail(NAME, &format!("status code: {status}"))?;
                Ok(false)
            }
            Err(reason) => {
                recorder.fail(NAME, &reason)?;
                Ok(false)
            }
        }
    }

    /// Runs the ordered case phases.
    async fn run_cases(&self, summary: &mut RunSummary) -> io::Result<()> {
        let ctx = CaseContext {
            client: &self.client,
            username: &self.username,
        };
        let mut recorder = CaseRecorder::new(summary, &self.console);

        self.console.section("Graph Operations Tests")?;
        graph::init_user_graph(&ctx, &mut recorder).await?;
        graph::get_task_graph_empty(&ctx, &mut recorder).await?;
        graph::update_task_graph(&ctx, &mut recorder).await?;
        graph::get_task_graph_with_tasks(&ctx, &mut recorder).await?;
        graph::rename_task(&ctx, &mut recorder).await?;
        graph::verify_rename(&ctx, &mut recorder).await?;
        graph::add_task_chain(&ctx, &mut recorder).await?;
        graph::clear_graph(&ctx, &mut recorder).await?;
        graph::verify_cleared(&ctx, &mut recorder).await?;

        self.console.section("Routine Tests")?;
        routines::save_routine(&ctx, &mut recorder).await?;
        routines::load_past_routines(&ctx, &mut recorder).await?;

        self.console.section("Graph Structure Tests")?;
        structure::rebuild_graph(&ctx, &mut recorder).await?;
        structure::reset_session(&ctx, &mut recorder).await?;

        self.console.section("Session Tests")?;
        session::session_token(&ctx, &mut recorder, self.config.session_api_key.as_deref())
            .await?;

        self.console.section("Analytics Tests")?;
        analytics::analytics_endpoints(&ctx, &mut recorder).await?;
        analytics::create_goal(&ctx, &mut recorder).await?;
        analytics::log_activity_event(&ctx, &mut recorder).await?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the current unix timestamp in whole seconds.
fn unix_seconds() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs()
}
