// crates/contract-forge-core/src/catalog/consulting.rs
// ============================================================================
// Module: Consulting Agreement
// Description: Field schema and template for the `consulting` contract type.
// Purpose: Professional consultation services.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The estimated-hours note only appears for hourly engagements.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::ContractTypeDefinition;
use crate::core::ContractTypeId;
use crate::core::FieldSpec;
use crate::core::FragmentRule;
use crate::core::Placeholder;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Payment structure that enables the estimated-hours note.
const HOURLY_RATE: &str = "Hourly Rate";

// ============================================================================
// SECTION: Template
// ============================================================================

/// Document template.
const TEMPLATE: &str = r#"CONSULTING AGREEMENT

This Consulting Agreement ("Agreement") is entered into on [DATE] between [CONSULTANT_NAME][CONSULTANT_COMPANY_TEXT] ("Consultant") and [CLIENT_NAME] of [CLIENT_COMPANY] ("Client").

1. CONSULTING SERVICES
The Consultant agrees to provide the following services:
[CONSULTING_SERVICES]

2. PROJECT OBJECTIVES
[OBJECTIVES]

3. DELIVERABLES
[DELIVERABLES]

4. COMPENSATION
Payment structure: [PAYMENT_STRUCTURE]
Rate/Fee: $[RATE][ESTIMATED_HOURS_TEXT]

5. PROJECT DURATION
[PROJECT_DURATION]

6. MEETINGS AND COMMUNICATION
Meeting frequency: [MEETING_FREQUENCY]

7. INDEPENDENT CONTRACTOR
Consultant is an independent contractor and not an employee of Client.

8. CONFIDENTIALITY
Consultant agrees to maintain strict confidentiality of all Client information and business matters.

9. TERMINATION
Either party may terminate this agreement with 30 days written notice.

Consultant: _________________________
[CONSULTANT_NAME]
[CONSULTANT_COMPANY]

Client: _________________________
[CLIENT_NAME]
[CLIENT_COMPANY]"#;

// ============================================================================
// SECTION: Definition
// ============================================================================

/// Builds the `consulting` definition.
pub(super) fn definition() -> ContractTypeDefinition {
    ContractTypeDefinition {
        id: ContractTypeId::new("consulting"),
        title: "Consulting Agreement".to_string(),
        description: "Professional consultation services".to_string(),
        fields: vec![
            FieldSpec::short_text("consultantName", "Consultant Name"),
            FieldSpec::short_text("consultantCompany", "Consulting Company").optional(),
            FieldSpec::short_text("clientName", "Client Name"),
            FieldSpec::short_text("clientCompany", "Client Company"),
            FieldSpec::long_text("consultingServices", "Consulting Services Description"),
            FieldSpec::long_text("objectives", "Project Objectives"),
            FieldSpec::choice("paymentStructure", "Payment Structure", &[
                HOURLY_RATE,
                "Fixed Project Fee",
                "Monthly Retainer",
                "Performance-based",
            ]),
            FieldSpec::number("rate", "Rate/Fee ($)"),
            FieldSpec::number("estimatedHours", "Estimated Hours (if hourly)").optional(),
            FieldSpec::short_text("projectDuration", "Project Duration"),
            FieldSpec::long_text("deliverables", "Expected Deliverables"),
            FieldSpec::choice("meetingFrequency", "Meeting Frequency", &[
                "Weekly",
                "Bi-weekly",
                "Monthly",
                "As needed",
                "Milestone-based",
            ]),
        ],
        template: TEMPLATE.to_string(),
        fragments: vec![
            FragmentRule::CompanySuffix {
                source: "consultantCompany".to_string(),
                target: Placeholder::named("CONSULTANT_COMPANY_TEXT"),
            },
            FragmentRule::ChoiceSuffix {
                choice: "paymentStructure".to_string(),
                equals: HOURLY_RATE.to_string(),
                source: "estimatedHours".to_string(),
                target: Placeholder::named("ESTIMATED_HOURS_TEXT"),
                prefix: " (Est. ".to_string(),
                suffix: " hours)".to_string(),
            },
        ],
    }
}
