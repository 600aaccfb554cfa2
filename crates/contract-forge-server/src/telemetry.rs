// crates/contract-forge-server/src/telemetry.rs
// ============================================================================
// Module: Server Telemetry
// Description: Metric hooks for HTTP request counters and latencies.
// Purpose: Provide metric events and latency buckets without hard deps.
// Dependencies: std
// ============================================================================

//! ## Overview
//! A thin metrics interface so deployments can plug in an exporter of their
//! choice. Labels are route templates, never raw paths, so record ids do not
//! leak into metric cardinality.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default latency buckets in milliseconds for request histograms.
pub const HTTP_LATENCY_BUCKETS_MS: &[u64] =
    &[1, 2, 5, 10, 25, 50, 100, 250, 500, 1_000, 2_500, 5_000, 10_000, 30_000];

// ============================================================================
// SECTION: Metric Labels
// ============================================================================

/// Request outcome classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// 1xx-3xx response.
    Ok,
    /// 4xx response.
    ClientError,
    /// 5xx response.
    ServerError,
}

impl RequestOutcome {
    /// Classifies an HTTP status code.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            500 .. => Self::ServerError,
            400 .. => Self::ClientError,
            _ => Self::Ok,
        }
    }

    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::ClientError => "client_error",
            Self::ServerError => "server_error",
        }
    }
}

/// Request metric event payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpMetricEvent {
    /// Request method.
    pub method: String,
    /// Matched route template.
    pub route: String,
    /// Response status code.
    pub status: u16,
    /// Outcome classification.
    pub outcome: RequestOutcome,
    /// Declared request body size in bytes.
    pub request_bytes: u64,
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Metrics sink for HTTP requests and latencies.
pub trait Metrics: Send + Sync {
    /// Records a request counter event.
    fn record_request(&self, event: &HttpMetricEvent);
    /// Records a latency observation for the request.
    fn record_latency(&self, event: &HttpMetricEvent, latency: Duration);
}

/// No-op metrics sink.
pub struct NoopMetrics;

impl Metrics for NoopMetrics {
    fn record_request(&self, _event: &HttpMetricEvent) {}

    fn record_latency(&self, _event: &HttpMetricEvent, _latency: Duration) {}
}

/// Returns the index of the first bucket whose bound covers `latency`.
///
/// Latencies above the last bound map to `HTTP_LATENCY_BUCKETS_MS.len()`.
#[must_use]
pub fn latency_bucket(latency: Duration) -> usize {
    let millis = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
    HTTP_LATENCY_BUCKETS_MS
        .iter()
        .position(|bound| millis <= *bound)
        .unwrap_or(HTTP_LATENCY_BUCKETS_MS.len())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_follows_status_class() {
        assert_eq!(RequestOutcome::from_status(204), RequestOutcome::Ok);
        assert_eq!(RequestOutcome::from_status(413), RequestOutcome::ClientError);
        assert_eq!(RequestOutcome::from_status(503), RequestOutcome::ServerError);
    }

    #[test]
    fn latency_buckets_are_inclusive_upper_bounds() {
        assert_eq!(latency_bucket(Duration::ZERO), 0);
        assert_eq!(latency_bucket(Duration::from_millis(5)), 2);
        assert_eq!(latency_bucket(Duration::from_millis(6)), 3);
        assert_eq!(latency_bucket(Duration::from_secs(60)), HTTP_LATENCY_BUCKETS_MS.len());
    }
}
