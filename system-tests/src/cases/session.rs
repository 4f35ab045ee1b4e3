// system-tests/src/cases/session.rs
// ============================================================================
// Module: Session Cases
// Description: Credential-gated session token case.
// Purpose: Exercise session token issuance when a credential is configured.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Credential-gated session token case, exercising session token issuance
//! when a credential is configured.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;

use serde_json::json;

use super::CaseContext;
use super::CaseRecorder;
use super::shape_error;

// ============================================================================
// SECTION: Cases
// ============================================================================

/// Requests a session token, skipping when no credential is configured.
///
/// A skip records neither a pass nor a fail. The shape check is superficial
/// (presence of a `key` field); token contents are opaque to the harness.
///
/// # Errors
///
/// Returns an error when writing console output fails.
pub async fn session_token(
    ctx: &CaseContext<'_>,
    recorder: &mut CaseRecorder<'_>,
    credential: Option<&str>,
) -> io::Result<()> {
    const NAME: &str = "Get Session Token";
    if credential.is_none() {
        return recorder.skip(NAME, "no session api key");
    }
    let reply = ctx.client.call_walker("get_session_token", json!({})).await;
    let check = reply.first_report().and_then(|report| {
        if report.contains_key("key") {
            Ok(())
        } else {
            Err(shape_error("expected key in report", report))
        }
    });
    recorder.record(NAME, check)
}
