// system-tests/src/config/env.rs
// ============================================================================
// Module: Harness Environment
// Description: Environment-backed configuration for the harness.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std, url
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use url::Url;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default base URL when no override is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
/// Default per-request timeout.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Default readiness poll ceiling.
const DEFAULT_READY_ATTEMPTS: u32 = 60;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for harness configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessEnv {
    /// Base URL of the task graph server under test.
    ServerUrl,
    /// Console output mode (`local` or `ci`).
    TestMode,
    /// Optional credential gating the session token case.
    SessionApiKey,
    /// Optional per-request timeout override in seconds (positive integer).
    TimeoutSeconds,
    /// Optional readiness poll ceiling override (positive integer).
    ReadyAttempts,
}

impl HarnessEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ServerUrl => "TASKGRAPH_SERVER_URL",
            Self::TestMode => "TASKGRAPH_TEST_MODE",
            Self::SessionApiKey => "TASKGRAPH_SESSION_API_KEY",
            Self::TimeoutSeconds => "TASKGRAPH_TEST_TIMEOUT_SEC",
            Self::ReadyAttempts => "TASKGRAPH_READY_ATTEMPTS",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Console output mode selected by the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TestMode {
    /// Colored output for interactive runs.
    #[default]
    Local,
    /// Plain output for CI logs.
    Ci,
}

/// Typed harness configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Base URL of the server under test, without a trailing slash.
    pub base_url: String,
    /// Console output mode.
    pub mode: TestMode,
    /// Optional credential gating the session token case.
    pub session_api_key: Option<String>,
    /// Per-request timeout for walker calls.
    pub request_timeout: Duration,
    /// Readiness poll ceiling.
    pub ready_attempts: u32,
}

impl HarnessConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, an invalid URL, mode, or timeout).
    pub fn load() -> Result<Self, String> {
        let base_url = read_env_nonempty(HarnessEnv::ServerUrl.as_str())?
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let base_url = normalize_base_url(HarnessEnv::ServerUrl.as_str(), &base_url)?;
        let mode = read_env_nonempty(HarnessEnv::TestMode.as_str())?
            .map(|value| parse_test_mode(HarnessEnv::TestMode.as_str(), &value))
            .transpose()?
            .unwrap_or_default();
        let session_api_key = read_env_nonempty(HarnessEnv::SessionApiKey.as_str())?;
        let request_timeout = read_env_nonempty(HarnessEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(HarnessEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let ready_attempts = read_env_nonempty(HarnessEnv::ReadyAttempts.as_str())?
            .map(|value| parse_positive_u32(HarnessEnv::ReadyAttempts.as_str(), &value))
            .transpose()?
            .unwrap_or(DEFAULT_READY_ATTEMPTS);
        Ok(Self {
            base_url,
            mode,
            session_api_key,
            request_timeout,
            ready_attempts,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Validates a base URL and strips any trailing slash.
///
/// # Errors
///
/// Returns an error when the value is not an absolute http(s) URL.
fn normalize_base_url(name: &str, raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|err| format!("{name} must be a valid URL: {err}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("{name} must use an http or https scheme"));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Parses the console output mode from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is neither `local` nor `ci`.
fn parse_test_mode(name: &str, raw: &str) -> Result<TestMode, String> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("local") {
        return Ok(TestMode::Local);
    }
    if trimmed.eq_ignore_ascii_case("ci") {
        return Ok(TestMode::Ci);
    }
    Err(format!("{name} must be local or ci"))
}

/// Parses a positive timeout value from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is missing, non-numeric, or zero.
fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, String> {
    parse_positive_u32(name, raw).map(|secs| Duration::from_secs(u64::from(secs)))
}

/// Parses a positive integer from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is missing, non-numeric, or zero.
fn parse_positive_u32(name: &str, raw: &str) -> Result<u32, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{name} must be a positive integer"));
    }
    let value: u32 =
        trimmed.parse().map_err(|_| format!("{name} must be a positive integer"))?;
    if value == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(value)
}
