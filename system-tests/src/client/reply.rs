// system-tests/src/client/reply.rs
// ============================================================================
// Module: Walker Reply
// Description: Envelope normalization for walker responses.
// Purpose: Unwrap success envelopes and classify payload shapes.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! The task graph server wraps walker results in a success envelope
//! `{"ok": true, "data": {"reports": [...]}}`, but older deployments return
//! the payload bare, and the unwrapped reports arrive as either a list of
//! mappings or a single mapping. Normalization is a pure, total function over
//! JSON values; classification turns the normalized payload into a tagged
//! variant so callers dispatch over shapes explicitly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Envelope Keys
// ============================================================================

/// Envelope key carrying the success flag.
const OK_KEY: &str = "ok";
/// Envelope key carrying the nested payload mapping.
const DATA_KEY: &str = "data";
/// Payload key carrying the reports list.
const REPORTS_KEY: &str = "reports";
/// Payload key marking an error-shaped reply.
const ERROR_KEY: &str = "error";

// ============================================================================
// SECTION: Normalizer
// ============================================================================

/// Unwraps a recognized success envelope into its reports payload.
///
/// Inputs that are not a mapping with a truthy `ok` flag and a `reports` key
/// nested under a `data` mapping are returned unchanged. An empty or falsy
/// reports payload becomes an empty mapping. The function is total and
/// idempotent over all JSON values.
#[must_use]
pub fn unwrap_reports(value: Value) -> Value {
    match extract_reports(&value) {
        Some(reports) => reports,
        None => value,
    }
}

/// Extracts the reports payload when the envelope shape matches.
fn extract_reports(value: &Value) -> Option<Value> {
    let envelope = value.as_object()?;
    if !envelope.get(OK_KEY).is_some_and(is_truthy) {
        return None;
    }
    let data = envelope.get(DATA_KEY)?.as_object()?;
    let reports = data.get(REPORTS_KEY)?;
    if is_truthy(reports) {
        Some(reports.clone())
    } else {
        Some(Value::Object(Map::new()))
    }
}

/// Returns the JSON truthiness of a value.
///
/// `null`, `false`, zero, the empty string, and empty collections are falsy;
/// everything else is truthy. This mirrors how the server's own tooling
/// evaluates the envelope flag.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
    }
}

// ============================================================================
// SECTION: Reply Variant
// ============================================================================

/// Normalized walker reply dispatched over explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum WalkerReply {
    /// An ordered sequence of report mappings.
    List(Vec<Map<String, Value>>),
    /// A single report mapping.
    Single(Map<String, Value>),
    /// A transport failure or error-shaped payload, as text.
    Error(String),
}

impl WalkerReply {
    /// Normalizes a raw response body and classifies its shape.
    #[must_use]
    pub fn from_payload(payload: Value) -> Self {
        Self::classify(unwrap_reports(payload))
    }

    /// Classifies an already-normalized payload into a reply variant.
    #[must_use]
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Object(report) => {
                if let Some(error) = report.get(ERROR_KEY) {
                    return Self::Error(render_error(error));
                }
                Self::Single(report)
            }
            Value::Array(items) => classify_list(items),
            other => Self::Error(format!("unexpected response shape: {other}")),
        }
    }

    /// Returns the first report mapping of the reply.
    ///
    /// # Errors
    ///
    /// Returns the error text for [`WalkerReply::Error`] replies and a shape
    /// description when a list reply carries no entries.
    pub fn first_report(&self) -> Result<&Map<String, Value>, String> {
        match self {
            Self::List(reports) => {
                reports.first().ok_or_else(|| "empty report list".to_string())
            }
            Self::Single(report) => Ok(report),
            Self::Error(reason) => Err(reason.clone()),
        }
    }
}

/// Classifies an array payload, requiring mapping entries throughout.
fn classify_list(items: Vec<Value>) -> WalkerReply {
    if items.is_empty() {
        return WalkerReply::Error("empty report list".to_string());
    }
    let mut reports = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Object(report) => reports.push(report),
            other => {
                return WalkerReply::Error(format!("non-mapping report entry: {other}"));
            }
        }
    }
    WalkerReply::List(reports)
}

/// Renders an error payload value as plain text.
fn render_error(error: &Value) -> String {
    match error {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
