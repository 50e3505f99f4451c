// ClaimAudit - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library, csv, chrono, serde.
// Must NOT depend on: ui, platform, app.

pub mod audit;
pub mod export;
pub mod filter;
pub mod ingest;
pub mod model;
