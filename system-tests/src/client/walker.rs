// system-tests/src/client/walker.rs
// ============================================================================
// Module: Walker Dispatcher
// Description: HTTP POST dispatch to named walker operations.
// Purpose: Issue single-attempt walker calls with failures surfaced as data.
// Dependencies: reqwest, serde_json
// ============================================================================

//! ## Overview
//! The dispatcher performs one HTTP POST per walker invocation under a fixed
//! timeout. Every transport-level failure (connect, timeout, non-2xx status,
//! body decode) becomes a [`WalkerReply::Error`] so cases fail with the raw
//! error text instead of aborting the run. No retries at any level.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use reqwest::Client;
use reqwest::StatusCode;
use serde_json::Value;

use super::reply::WalkerReply;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Timeout for the root liveness probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

// ============================================================================
// SECTION: Client
// ============================================================================

/// HTTP client for the task graph walker API.
#[derive(Debug, Clone)]
pub struct WalkerClient {
    /// Base URL of the server, without a trailing slash.
    base_url: String,
    /// Underlying HTTP client carrying the walker-call timeout.
    client: Client,
}

impl WalkerClient {
    /// Creates a new walker client with a fixed per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| format!("failed to build http client: {err}"))?;
        Ok(Self {
            base_url,
            client,
        })
    }

    /// Returns the base URL for the server under test.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Invokes a walker with JSON parameters and normalizes the reply.
    ///
    /// Transport failures surface as [`WalkerReply::Error`]; this call never
    /// fails the harness itself.
    pub async fn call_walker(&self, walker: &str, params: Value) -> WalkerReply {
        let url = format!("{}/walker/{walker}", self.base_url);
        let response = match self.client.post(&url).json(&params).send().await {
            Ok(response) => response,
            Err(err) => {
                return WalkerReply::Error(format!("request to {walker} failed: {err}"));
            }
        };
        let status = response.status();
        if !status.is_success() {
            return WalkerReply::Error(format!("http status {status} from {walker}"));
        }
        match response.json::<Value>().await {
            Ok(payload) => WalkerReply::from_payload(payload),
            Err(err) => WalkerReply::Error(format!("invalid json from {walker}: {err}")),
        }
    }

    /// Probes the server root for liveness.
    ///
    /// # Errors
    ///
    /// Returns an error when the probe request cannot be completed.
    pub async fn probe_root(&self) -> Result<StatusCode, String> {
        let url = format!("{}/", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .map_err(|err| format!("liveness probe failed: {err}"))?;
        Ok(response.status())
    }
}
