// crates/contract-forge-core/src/catalog/graphic_design.rs
// ============================================================================
// Module: Graphic Design Contract
// Description: Field schema and template for the `graphic-design` contract type.
// Purpose: Design services and creative work contracts.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The designer's company is optional and rendered through a company suffix.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::ContractTypeDefinition;
use crate::core::ContractTypeId;
use crate::core::FieldSpec;
use crate::core::FragmentRule;
use crate::core::Placeholder;

// ============================================================================
// SECTION: Template
// ============================================================================

/// Document template.
const TEMPLATE: &str = r#"GRAPHIC DESIGN CONTRACT

This Graphic Design Agreement ("Agreement") is entered into on [DATE] between [DESIGNER_NAME][DESIGNER_COMPANY_TEXT] ("Designer") and [CLIENT_NAME] of [CLIENT_COMPANY] ("Client").

1. PROJECT DETAILS
Type of work: [DESIGN_TYPE]
Description: [PROJECT_DESCRIPTION]

2. DELIVERABLES
[DELIVERABLES]

3. DESIGN PROCESS
Initial concepts: [NUMBER_OF_CONCEPTS]
Revision rounds: [REVISION_ROUNDS]
Additional revisions will be billed at $75/hour

4. TIMELINE
Project completion: [TIMELINE] days from approval of this contract

5. PAYMENT
Total fee: $[TOTAL_FEE]
Payment schedule: 50% deposit, 50% upon completion

6. USAGE RIGHTS
[USAGE_RIGHTS]

7. COPYRIGHT
Designer retains copyright until final payment is received.

Designer: _________________________
[DESIGNER_NAME]
[DESIGNER_COMPANY]

Client: _________________________
[CLIENT_NAME]
[CLIENT_COMPANY]"#;

// ============================================================================
// SECTION: Definition
// ============================================================================

/// Builds the `graphic-design` definition.
pub(super) fn definition() -> ContractTypeDefinition {
    ContractTypeDefinition {
        id: ContractTypeId::new("graphic-design"),
        title: "Graphic Design Contract".to_string(),
        description: "Design services and creative work contracts".to_string(),
        fields: vec![
            FieldSpec::short_text("designerName", "Designer Name"),
            FieldSpec::short_text("designerCompany", "Designer Company").optional(),
            FieldSpec::short_text("clientName", "Client Name"),
            FieldSpec::short_text("clientCompany", "Client Company"),
            FieldSpec::choice("designType", "Type of Design Work", &[
                "Logo Design",
                "Brand Identity",
                "Marketing Materials",
                "Web Graphics",
                "Print Design",
                "Packaging Design",
                "Other",
            ]),
            FieldSpec::long_text("projectDescription", "Project Description"),
            FieldSpec::long_text("deliverables", "Deliverables & File Formats"),
            FieldSpec::number("numberOfConcepts", "Number of Initial Concepts").with_default("3"),
            FieldSpec::number("revisionRounds", "Revision Rounds Included").with_default("3"),
            FieldSpec::number("totalFee", "Total Design Fee ($)"),
            FieldSpec::number("timeline", "Project Timeline (days)"),
            FieldSpec::choice("usageRights", "Usage Rights", &[
                "Unlimited usage rights",
                "Limited commercial use",
                "Personal use only",
                "Exclusive rights",
            ]),
        ],
        template: TEMPLATE.to_string(),
        fragments: vec![FragmentRule::CompanySuffix {
            source: "designerCompany".to_string(),
            target: Placeholder::named("DESIGNER_COMPANY_TEXT"),
        }],
    }
}
