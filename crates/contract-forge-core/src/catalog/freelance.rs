// crates/contract-forge-core/src/catalog/freelance.rs
// ============================================================================
// Module: Freelance Contract
// Description: Field schema and template for the `freelance` contract type.
// Purpose: Independent contractor agreements.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Every value in this template is a direct field substitution.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::ContractTypeDefinition;
use crate::core::ContractTypeId;
use crate::core::FieldSpec;

// ============================================================================
// SECTION: Template
// ============================================================================

/// Document template.
const TEMPLATE: &str = r#"FREELANCE CONTRACT

This Freelance Agreement ("Agreement") is entered into on [DATE] between [FREELANCER_NAME], located at [FREELANCER_ADDRESS] ("Freelancer") and [CLIENT_NAME] of [CLIENT_COMPANY] ("Client").

1. PROJECT DESCRIPTION
[PROJECT_DESCRIPTION]

2. DELIVERABLES
The Freelancer will provide:
[DELIVERABLES]

3. COMPENSATION
Payment structure: [PAYMENT_TYPE]
Amount: $[PAYMENT_AMOUNT]
Invoice schedule: [INVOICE_SCHEDULE]

4. INTELLECTUAL PROPERTY
[INTELLECTUAL_PROPERTY_RIGHTS]

5. INDEPENDENT CONTRACTOR STATUS
Freelancer is an independent contractor and not an employee of Client.

6. CONFIDENTIALITY
Freelancer agrees to maintain confidentiality of all Client information.

Freelancer: _________________________
[FREELANCER_NAME]

Client: _________________________
[CLIENT_NAME]
[CLIENT_COMPANY]"#;

// ============================================================================
// SECTION: Definition
// ============================================================================

/// Builds the `freelance` definition.
pub(super) fn definition() -> ContractTypeDefinition {
    ContractTypeDefinition {
        id: ContractTypeId::new("freelance"),
        title: "Freelance Contract".to_string(),
        description: "Independent contractor agreements".to_string(),
        fields: vec![
            FieldSpec::short_text("freelancerName", "Freelancer Name"),
            FieldSpec::long_text("freelancerAddress", "Freelancer Address"),
            FieldSpec::short_text("clientName", "Client Name"),
            FieldSpec::short_text("clientCompany", "Client Company"),
            FieldSpec::long_text("projectDescription", "Project Description"),
            FieldSpec::long_text("deliverables", "Deliverables"),
            FieldSpec::choice("paymentType", "Payment Type", &["Fixed Project Rate", "Hourly Rate"]),
            FieldSpec::number("paymentAmount", "Amount ($)"),
            FieldSpec::choice("invoiceSchedule", "Invoice Schedule", &[
                "Upon completion",
                "Weekly",
                "Bi-weekly",
                "Monthly",
            ]),
            FieldSpec::choice("intellectualPropertyRights", "Intellectual Property Rights", &[
                "Transfer to client upon payment",
                "Retained by freelancer",
                "Shared ownership",
            ]),
        ],
        template: TEMPLATE.to_string(),
        fragments: Vec::new(),
    }
}
