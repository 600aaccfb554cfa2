// crates/contract-forge-core/src/catalog/mod.rs
// ============================================================================
// Module: Contract Catalog
// Description: Built-in contract type definitions.
// Purpose: Supply the eight contract categories in their fixed display order.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Each submodule owns one contract category: its field schema, template
//! prose, and fragment rules. The registry consumes [`builtin_definitions`]
//! once and serves the result for the life of the process.

// ============================================================================
// SECTION: Submodules
// ============================================================================

mod consulting;
mod content_writing;
mod freelance;
mod graphic_design;
mod nda;
mod payment_terms;
mod service;
mod web_dev;

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::ContractTypeDefinition;

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Returns the built-in definitions in display order.
#[must_use]
pub fn builtin_definitions() -> Vec<ContractTypeDefinition> {
    vec![
        nda::definition(),
        service::definition(),
        freelance::definition(),
        web_dev::definition(),
        graphic_design::definition(),
        content_writing::definition(),
        consulting::definition(),
        payment_terms::definition(),
    ]
}
