// crates/contract-forge-core/src/catalog/nda.rs
// ============================================================================
// Module: Non-Disclosure Agreement
// Description: Field schema and template for the `nda` contract type.
// Purpose: Protect confidential information and trade secrets.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The receiving party's company is optional; the opening paragraph renders it
//! through a company-suffix fragment so an omitted company leaves no dangling
//! ` of `.

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
const TEMPLATE: &str = r#"NON-DISCLOSURE AGREEMENT

This Non-Disclosure Agreement ("Agreement") is entered into on [DATE] between [DISCLOSING_PARTY_NAME] of [DISCLOSING_PARTY_COMPANY] ("Disclosing Party") and [RECEIVING_PARTY_NAME][RECEIVING_PARTY_COMPANY_TEXT] ("Receiving Party") for the purpose of [PROJECT_DESCRIPTION].

1. DEFINITION OF CONFIDENTIAL INFORMATION
Confidential Information includes all written, electronic, or oral information disclosed by the Disclosing Party to the Receiving Party, including but not limited to: technical data, trade secrets, know-how, research, product plans, products, services, customers, customer lists, markets, software, developments, inventions, processes, formulas, technology, designs, drawings, engineering, hardware configuration information, marketing, finances, or other business information.

2. OBLIGATIONS OF RECEIVING PARTY
The Receiving Party agrees to:
a) Hold all Confidential Information in strict confidence
b) Not disclose Confidential Information to third parties without prior written consent
c) Use Confidential Information solely for the purpose stated above
d) Take reasonable precautions to protect the confidentiality of the information

3. TERM
This Agreement shall remain in effect for [CONFIDENTIALITY_PERIOD] years from the date of signing.

4. RETURN OF MATERIALS
Upon termination of this Agreement, the Receiving Party shall return or destroy all materials containing Confidential Information.

5. GOVERNING LAW
This Agreement shall be governed by the laws of [JURISDICTION].

IN WITNESS WHEREOF, the parties have executed this Agreement on the date first written above.

Disclosing Party: _________________________
[DISCLOSING_PARTY_NAME]
[DISCLOSING_PARTY_COMPANY]

Receiving Party: _________________________
[RECEIVING_PARTY_NAME]
[RECEIVING_PARTY_COMPANY]"#;

// ============================================================================
// SECTION: Definition
// ============================================================================

/// Builds the `nda` definition.
pub(super) fn definition() -> ContractTypeDefinition {
    ContractTypeDefinition {
        id: ContractTypeId::new("nda"),
        title: "Non-Disclosure Agreement".to_string(),
        description: "Protect confidential information and trade secrets".to_string(),
        fields: vec![
            FieldSpec::short_text("disclosingPartyName", "Disclosing Party Name"),
            FieldSpec::short_text("disclosingPartyCompany", "Disclosing Party Company"),
            FieldSpec::short_text("receivingPartyName", "Receiving Party Name"),
            FieldSpec::short_text("receivingPartyCompany", "Receiving Party Company").optional(),
            FieldSpec::long_text("projectDescription", "Purpose/Project Description"),
            FieldSpec::number("confidentialityPeriod", "Confidentiality Period (years)")
                .with_default("3"),
            FieldSpec::short_text("jurisdiction", "Governing Law (State/Country)")
                .with_default("United States"),
        ],
        template: TEMPLATE.to_string(),
        fragments: vec![FragmentRule::CompanySuffix {
            source: "receivingPartyCompany".to_string(),
            target: Placeholder::named("RECEIVING_PARTY_COMPANY_TEXT"),
        }],
    }
}
