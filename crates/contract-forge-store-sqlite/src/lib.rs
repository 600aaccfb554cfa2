// crates/contract-forge-store-sqlite/src/lib.rs
// ============================================================================
// Module: SQLite Contract Store
// Description: Durable ContractStore backend using SQLite WAL.
// Purpose: Persist generated contracts across restarts.
// Dependencies: contract-forge-core, rusqlite
// ============================================================================

//! ## Overview
//! This crate provides a SQLite-backed [`ContractStore`] implementation.
//! Records are stored as canonical JSON with a digest and verified on every
//! load. Download counters live in their own column so increments never
//! rewrite the hashed payload.
//!
//! [`ContractStore`]: contract_forge_core::ContractStore

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::MAX_RECORD_BYTES;
pub use store::SqliteContractStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
