// crates/contract-forge-config/src/lib.rs
// ============================================================================
// Module: Contract Forge Config Library
// Description: Canonical config model, validation, and example generation.
// Purpose: Single source of truth for contract-forge.toml semantics.
// Dependencies: contract-forge-core, contract-forge-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! `contract-forge-config` defines the configuration model for the Contract
//! Forge server and CLI. Validation is strict and fails closed; every section
//! defaults, so an empty file is a valid configuration.
//!
//! Security posture: config inputs are untrusted. Secrets are never read from
//! the file, only from the environment variable the file names.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
