// ClaimAudit - app/mod.rs
//
// Application layer: session context and UI-facing state.
// Dependencies: core layer, platform (file reads, config).
// Must NOT depend on: ui.

pub mod session;
pub mod state;
