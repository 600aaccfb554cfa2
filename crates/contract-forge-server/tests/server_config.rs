// crates/contract-forge-server/tests/server_config.rs
// ============================================================================
// Module: Server Configuration Tests
// Description: Server assembly from `contract-forge.toml` settings.
// Purpose: Verify store, audit, and provider wiring from configuration.
// Dependencies: contract-forge-server, contract-forge-config, tempfile, toml
// ============================================================================

//! ## Overview
//! Builds [`ContractForgeServer`] from parsed TOML and drives the resulting
//! router, checking that configured backends are the ones in use.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use std::path::Path;

use axum::http::StatusCode;
use contract_forge_config::ContractForgeConfig;
use contract_forge_core::Timestamp;
use contract_forge_server::AppState;
use contract_forge_server::ContractForgeServer;
use contract_forge_server::ServerError;
use serde_json::Value;
use serde_json::json;

use crate::common::generate_service;
use crate::common::get;
use crate::common::post_json;
use crate::common::service_form;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a config from TOML text without validating it.
fn parse_config(text: &str) -> ContractForgeConfig {
    toml::from_str(text).unwrap()
}

/// Config with a `SQLite` store and file audit sink under `dir`.
fn durable_config(dir: &Path) -> ContractForgeConfig {
    let db = dir.join("contracts.db");
    let audit = dir.join("audit.jsonl");
    parse_config(&format!(
        r"
[store]
type = 'sqlite'
path = '{}'

[documents]
date_style = 'iso'

[audit]
sink = 'file'
path = '{}'
",
        db.display(),
        audit.display()
    ))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Verifies records persist in `SQLite` across server instances.
#[tokio::test]
async fn sqlite_store_persists_across_servers() {
    let dir = tempfile::tempdir().unwrap();
    let first = ContractForgeServer::from_config(durable_config(dir.path())).unwrap();
    let id = generate_service(&first.router()).await;
    drop(first);

    let second = ContractForgeServer::from_config(durable_config(dir.path())).unwrap();
    let response = get(&second.router(), &format!("/api/contracts/{id}")).await;
    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["id"], id.as_str());
    assert!(body["content"].as_str().unwrap().contains("Acme"));
}

/// Verifies the configured date style reaches the engine.
#[tokio::test]
async fn configured_date_style_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let server = ContractForgeServer::from_config(durable_config(dir.path())).unwrap();
    let response = post_json(
        &server.router(),
        "/api/contracts/preview",
        &json!({ "contractType": "service", "formData": service_form() }),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    let issued_at = Timestamp::from_unix_millis(body["issuedAt"].as_i64().unwrap());
    let stamp = issued_at.iso_date().unwrap();
    assert!(body["content"].as_str().unwrap().contains(&format!("entered into on {stamp}")));
}

/// Verifies the file audit sink receives JSON lines.
#[tokio::test]
async fn file_audit_sink_receives_events() {
    let dir = tempfile::tempdir().unwrap();
    let server = ContractForgeServer::from_config(durable_config(dir.path())).unwrap();
    let id = generate_service(&server.router()).await;

    let text = std::fs::read_to_string(dir.path().join("audit.jsonl")).unwrap();
    let events: Vec<Value> = text.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
    assert!(events.iter().any(|event| event["event"] == "contract_generated"
        && event["contract_id"] == id.as_str()));
    assert!(events.iter().any(|event| event["event"] == "http_request"
        && event["route"] == "/api/contracts/generate"));
    assert!(!text.contains("Acme"));
}

/// Verifies invalid configuration is refused before any backend opens.
#[test]
fn invalid_config_is_rejected() {
    let config = parse_config("[store]\ntype = 'sqlite'\n");
    let Err(err) = ContractForgeServer::from_config(config) else {
        panic!("expected config error");
    };
    assert!(matches!(err, ServerError::Config(message) if message.contains("requires path")));
}

/// Verifies remote grammar and email providers build from configuration.
#[test]
fn remote_providers_build_from_config() {
    let mut config = parse_config(
        r"
[email]
provider = 'sendgrid'
api_key_env = 'CONTRACT_FORGE_TEST_UNSET_KEY'

[grammar]
mode = 'language_tool'
endpoint = 'http://127.0.0.1:9/v2/check'

[audit]
sink = 'none'
",
    );
    config.validate().unwrap();
    assert!(AppState::from_config(&config).is_ok());
}
