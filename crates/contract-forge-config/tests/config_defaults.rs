//! Default and example config tests for contract-forge-config.
// crates/contract-forge-config/tests/config_defaults.rs
// =============================================================================
// Module: Config Defaults Tests
// Description: Validate defaults, the canonical example, and file loading.
// Purpose: Ensure an empty file is valid and the example stays in sync.
// =============================================================================

use std::fs;

use contract_forge_config::AuditSinkType;
use contract_forge_config::ConfigError;
use contract_forge_config::ContractForgeConfig;
use contract_forge_config::EmailProvider;
use contract_forge_config::GrammarMode;
use contract_forge_config::StoreType;
use contract_forge_config::config_toml_example;
use contract_forge_core::DateStyle;
use tempfile::TempDir;

mod common;

use common::TestResult;

#[test]
fn empty_config_uses_defaults() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    if config.server.bind != "127.0.0.1:8080" || config.server.max_body_bytes != 1024 * 1024 {
        return Err("unexpected server defaults".to_string());
    }
    if config.store.store_type != StoreType::Memory || config.store.sqlite_config().is_some() {
        return Err("default store must be memory".to_string());
    }
    if config.documents.date_style != DateStyle::Us {
        return Err("default date style must be us".to_string());
    }
    if config.email.provider != EmailProvider::Disabled
        || config.email.from_address != "noreply@contractgen.com"
    {
        return Err("unexpected email defaults".to_string());
    }
    if config.grammar.mode != GrammarMode::Builtin || config.grammar.language != "en-US" {
        return Err("unexpected grammar defaults".to_string());
    }
    if config.audit.sink != AuditSinkType::Stderr {
        return Err("default audit sink must be stderr".to_string());
    }
    Ok(())
}

#[test]
fn example_config_parses_and_validates() -> TestResult {
    let mut config =
        common::config_from_toml(&config_toml_example()).map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    let sqlite = config.store.sqlite_config().ok_or("example must configure sqlite")?;
    if sqlite.path.to_string_lossy() != "contract-forge.db" {
        return Err(format!("unexpected sqlite path {}", sqlite.path.display()));
    }
    if config.email.provider != EmailProvider::Sendgrid {
        return Err("example must configure sendgrid".to_string());
    }
    Ok(())
}

#[test]
fn engine_config_carries_date_style() -> TestResult {
    let config = common::config_from_toml("[documents]\ndate_style = \"day_first\"\n")
        .map_err(|err| err.to_string())?;
    if config.engine_config().date_style != DateStyle::DayFirst {
        return Err("engine config must follow documents.date_style".to_string());
    }
    Ok(())
}

#[test]
fn unknown_enum_values_fail_to_parse() -> TestResult {
    if common::config_from_toml("[store]\ntype = \"postgres\"\n").is_ok() {
        return Err("unknown store type must not parse".to_string());
    }
    if common::config_from_toml("[grammar]\nmode = \"magic\"\n").is_ok() {
        return Err("unknown grammar mode must not parse".to_string());
    }
    Ok(())
}

#[test]
fn load_reads_and_validates_file() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = dir.path().join("contract-forge.toml");
    fs::write(&path, "[server]\nbind = \"0.0.0.0:9000\"\n").map_err(|err| err.to_string())?;
    let config = ContractForgeConfig::load(Some(&path)).map_err(|err| err.to_string())?;
    let addr = config.server.bind_addr().map_err(|err| err.to_string())?;
    if addr.port() != 9000 {
        return Err(format!("unexpected port {}", addr.port()));
    }
    Ok(())
}

#[test]
fn load_reports_missing_file_as_io() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    match ContractForgeConfig::load(Some(&path)) {
        Err(ConfigError::Io(_)) => Ok(()),
        Err(other) => Err(format!("unexpected error {other}")),
        Ok(_) => Err("missing file must fail".to_string()),
    }
}

#[test]
fn load_reports_malformed_toml_as_parse() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[server\nbind = ").map_err(|err| err.to_string())?;
    match ContractForgeConfig::load(Some(&path)) {
        Err(ConfigError::Parse(_)) => Ok(()),
        Err(other) => Err(format!("unexpected error {other}")),
        Ok(_) => Err("malformed file must fail".to_string()),
    }
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = dir.path().join("huge.toml");
    let padding = format!("# {}\n", "x".repeat(1024 * 1024));
    fs::write(&path, padding).map_err(|err| err.to_string())?;
    match ContractForgeConfig::load(Some(&path)) {
        Err(ConfigError::Invalid(message)) if message.contains("size limit") => Ok(()),
        Err(other) => Err(format!("unexpected error {other}")),
        Ok(_) => Err("oversized file must fail".to_string()),
    }
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = dir.path().join("binary.toml");
    fs::write(&path, [0xff_u8, 0xfe, 0x00]).map_err(|err| err.to_string())?;
    match ContractForgeConfig::load(Some(&path)) {
        Err(ConfigError::Invalid(message)) if message.contains("utf-8") => Ok(()),
        Err(other) => Err(format!("unexpected error {other}")),
        Ok(_) => Err("non utf-8 file must fail".to_string()),
    }
}
