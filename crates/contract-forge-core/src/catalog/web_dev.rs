// crates/contract-forge-core/src/catalog/web_dev.rs
// ============================================================================
// Module: Website Development Contract
// Description: Field schema and template for the `web-dev` contract type.
// Purpose: Web development project contracts.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The deposit amount is derived from the total cost and deposit percentage.

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
const TEMPLATE: &str = r#"WEBSITE DEVELOPMENT CONTRACT

This Website Development Agreement ("Agreement") is entered into on [DATE] between [DEVELOPER_NAME] of [DEVELOPER_COMPANY] ("Developer") and [CLIENT_NAME] of [CLIENT_COMPANY] ("Client").

1. PROJECT SCOPE
Website specifications: [WEBSITE_SPECS]
Number of pages: [NUMBER_OF_PAGES]
Key features: [FEATURES]

2. TIMELINE
Estimated completion: [TIMELINE] weeks from project start date

3. PAYMENT TERMS
Total cost: $[TOTAL_COST]
Deposit: [DEPOSIT_PERCENT]% ($[DEPOSIT_AMOUNT]) due upon signing
Remaining balance due upon completion

4. HOSTING AND MAINTENANCE
[HOSTING_MAINTENANCE]

5. CONTENT
[CONTENT_RESPONSIBILITY]

6. TESTING AND APPROVAL
Client has 7 days to test and approve deliverables. Silence is deemed acceptance.

7. WARRANTY
Developer provides 30-day warranty on functionality bugs.

Developer: _________________________
[DEVELOPER_NAME]
[DEVELOPER_COMPANY]

Client: _________________________
[CLIENT_NAME]
[CLIENT_COMPANY]"#;

// ============================================================================
// SECTION: Definition
// ============================================================================

/// Builds the `web-dev` definition.
pub(super) fn definition() -> ContractTypeDefinition {
    ContractTypeDefinition {
        id: ContractTypeId::new("web-dev"),
        title: "Website Development Contract".to_string(),
        description: "Web development project contracts".to_string(),
        fields: vec![
            FieldSpec::short_text("developerName", "Developer/Agency Name"),
            FieldSpec::short_text("developerCompany", "Developer/Agency Company"),
            FieldSpec::short_text("clientName", "Client Name"),
            FieldSpec::short_text("clientCompany", "Client Company"),
            FieldSpec::long_text("websiteSpecs", "Website Specifications"),
            FieldSpec::number("numberOfPages", "Number of Pages"),
            FieldSpec::long_text("features", "Key Features"),
            FieldSpec::number("timeline", "Project Timeline (weeks)"),
            FieldSpec::number("totalCost", "Total Project Cost ($)"),
            FieldSpec::number("depositPercent", "Deposit Percentage (%)").with_default("50"),
            FieldSpec::choice("hostingMaintenance", "Hosting & Maintenance", &[
                "Included for 1 year",
                "Client responsibility",
                "Available as add-on service",
            ]),
            FieldSpec::choice("contentResponsibility", "Content Responsibility", &[
                "Client provides all content",
                "Developer creates content",
                "Mixed responsibility",
            ]),
        ],
        template: TEMPLATE.to_string(),
        fragments: vec![FragmentRule::PercentageOf {
            base: "totalCost".to_string(),
            percent: "depositPercent".to_string(),
            target: Placeholder::named("DEPOSIT_AMOUNT"),
        }],
    }
}
