// crates/contract-forge-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs, tests, and `config example`.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for Contract Forge configuration. The example parses and
//! validates against the config model; tests keep the two in sync.

/// Returns a canonical example `contract-forge.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[server]
bind = "127.0.0.1:8080"
max_body_bytes = 1048576

[store]
type = "sqlite"
path = "contract-forge.db"
journal_mode = "wal"
sync_mode = "full"
busy_timeout_ms = 5000

[documents]
date_style = "us"
max_issued_at_skew_ms = 86400000

[email]
provider = "sendgrid"
api_key_env = "SENDGRID_API_KEY"
from_address = "noreply@contractgen.com"
endpoint = "https://api.sendgrid.com/v3/mail/send"
timeout_ms = 10000

[grammar]
mode = "builtin"
# mode = "language_tool"
endpoint = "https://api.languagetool.org/v2/check"
language = "en-US"
timeout_ms = 5000

[audit]
sink = "file"
path = "contract-forge-audit.jsonl"
"#,
    )
}
