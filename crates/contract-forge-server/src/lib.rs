// crates/contract-forge-server/src/lib.rs
// ============================================================================
// Module: Contract Forge Server Library
// Description: HTTP surface for the contract generator.
// Purpose: Expose the router, state assembly, audit, and telemetry hooks.
// Dependencies: crate::{audit, error, routes, server, state, telemetry}
// ============================================================================

//! ## Overview
//! The server crate maps the contract service, exporters, and providers onto
//! a JSON HTTP API under `/api`. Hosts either run [`ContractForgeServer`] from
//! configuration or mount [`router`] with a hand-built [`AppState`].

pub mod audit;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;

pub use audit::AuditEvent;
pub use audit::AuditRecord;
pub use audit::AuditSink;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use error::ApiError;
pub use error::ServerError;
pub use routes::router;
pub use server::ContractForgeServer;
pub use server::startup_warnings;
pub use state::AppState;
pub use state::DEFAULT_MAX_ISSUED_AT_SKEW_MS;
pub use state::build_grammar;
pub use telemetry::HTTP_LATENCY_BUCKETS_MS;
pub use telemetry::HttpMetricEvent;
pub use telemetry::Metrics;
pub use telemetry::NoopMetrics;
pub use telemetry::RequestOutcome;
pub use telemetry::latency_bucket;
