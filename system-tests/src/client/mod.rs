// system-tests/src/client/mod.rs
// ============================================================================
// Module: Walker Client
// Description: HTTP access to the task graph walker API.
// Purpose: Provide dispatch, normalization, and readiness probing.
// Dependencies: reqwest, serde_json, tokio
// ============================================================================

//! ## Overview
//! The client layer owns everything on the wire: the walker dispatcher, the
//! envelope normalizer, and the readiness poller. Transport failures never
//! escape as errors; they surface as [`WalkerReply::Error`] data.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod readiness;
mod reply;
mod walker;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use readiness::wait_for_server;
pub use reply::WalkerReply;
pub use reply::is_truthy;
pub use reply::unwrap_reports;
pub use walker::WalkerClient;
