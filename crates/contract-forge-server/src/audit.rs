// crates/contract-forge-server/src/audit.rs
// ============================================================================
// Module: Audit Logging
// Description: Structured audit events for HTTP handling and record lifecycle.
// Purpose: Emit JSON-line audit records to a pluggable sink.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Audit records are serialized as one JSON object per line. Events never
//! carry document content, form answers, or email addresses; contracts are
//! identified by id, type, and content hash only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Audit event payload, tagged by event name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuditEvent {
    /// One handled HTTP request.
    HttpRequest {
        /// Request method.
        method: String,
        /// Matched route template, or `unmatched`.
        route: String,
        /// Response status code.
        status: u16,
        /// Handling latency in milliseconds.
        latency_ms: u64,
        /// Declared request body size in bytes.
        request_bytes: u64,
    },
    /// A contract record was stored.
    ContractGenerated {
        /// Record identifier.
        contract_id: String,
        /// Contract type identifier.
        contract_type: String,
        /// Hex sha-256 of the document text.
        content_hash: String,
    },
    /// A download was recorded.
    ContractDownloaded {
        /// Record identifier.
        contract_id: String,
    },
    /// A record was exported.
    ContractExported {
        /// Record identifier.
        contract_id: String,
        /// Export format label.
        format: String,
        /// Artifact size in bytes.
        bytes: usize,
    },
    /// An email delivery attempt finished.
    EmailDispatch {
        /// Record identifier.
        contract_id: String,
        /// Outcome label (`sent`, `not_configured`, `failed`).
        outcome: String,
    },
    /// The grammar checker failed and the request degraded to no suggestions.
    GrammarDegraded {
        /// Failure description.
        reason: String,
    },
    /// Startup posture notice.
    ServerStart {
        /// Bound address.
        bind: String,
        /// Warnings about the running configuration.
        warnings: Vec<String>,
    },
}

/// Timestamped audit record as written by sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditRecord {
    /// Record timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Event payload.
    #[serde(flatten)]
    pub event: AuditEvent,
}

impl AuditRecord {
    /// Stamps an event with the current wall-clock time.
    #[must_use]
    pub fn now(event: AuditEvent) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            timestamp_ms,
            event,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for server events.
pub trait AuditSink: Send + Sync {
    /// Records an audit record.
    fn record(&self, record: &AuditRecord);

    /// Stamps and records an event.
    fn emit(&self, event: AuditEvent) {
        self.record(&AuditRecord::now(event));
    }
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, record: &AuditRecord) {
        if let Ok(payload) = serde_json::to_string(record) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, record: &AuditRecord) {
        if let Ok(payload) = serde_json::to_string(record)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _record: &AuditRecord) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only assertions.")]

    use serde_json::Value;

    use super::*;

    #[test]
    fn records_flatten_the_event_tag() {
        let record = AuditRecord {
            timestamp_ms: 7,
            event: AuditEvent::ContractDownloaded {
                contract_id: "abc".to_string(),
            },
        };
        let value: Value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["event"], "contract_downloaded");
        assert_eq!(value["timestamp_ms"], 7);
        assert_eq!(value["contract_id"], "abc");
    }

    #[test]
    fn file_sink_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let sink = FileAuditSink::new(&path).unwrap();
        sink.emit(AuditEvent::GrammarDegraded {
            reason: "timeout".to_string(),
        });
        sink.emit(AuditEvent::ContractDownloaded {
            contract_id: "abc".to_string(),
        });
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"event\":\"grammar_degraded\""));
    }
}
