// crates/contract-forge-core/src/catalog/content_writing.rs
// ============================================================================
// Module: Content Writing Contract
// Description: Field schema and template for the `content-writing` contract type.
// Purpose: Writing and content creation services.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Three fragments: the optional writer company suffix, the total project
//! value (rate times piece count), and a fallback sentence for research
//! requirements.

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

/// Sentence rendered when no research requirements are given.
const NO_RESEARCH: &str = "No specific research requirements specified.";

// ============================================================================
// SECTION: Template
// ============================================================================

/// Document template.
const TEMPLATE: &str = r#"CONTENT WRITING CONTRACT

This Content Writing Agreement ("Agreement") is entered into on [DATE] between [WRITER_NAME][WRITER_COMPANY_TEXT] ("Writer") and [CLIENT_NAME] of [CLIENT_COMPANY] ("Client").

1. CONTENT SPECIFICATIONS
Content type: [CONTENT_TYPE]
Description: [CONTENT_DESCRIPTION]
Word count per piece: [WORD_COUNT] words
Total pieces: [ARTICLE_COUNT]

2. RESEARCH REQUIREMENTS
[RESEARCH_REQUIREMENTS]

3. DELIVERY SCHEDULE
[DELIVERY_SCHEDULE]

4. REVISIONS
[REVISION_ROUNDS] rounds of revisions included per piece
Additional revisions: $50 per round

5. PAYMENT TERMS
Rate: $[PAYMENT_PER_PIECE] per piece
Total project value: $[TOTAL_PROJECT_VALUE]
Payment: Net 15 terms

6. USAGE RIGHTS
[USAGE_RIGHTS]

7. CONTENT STANDARDS
All content will be original, grammatically correct, and optimized for the intended audience.

Writer: _________________________
[WRITER_NAME]
[WRITER_COMPANY]

Client: _________________________
[CLIENT_NAME]
[CLIENT_COMPANY]"#;

// ============================================================================
// SECTION: Definition
// ============================================================================

/// Builds the `content-writing` definition.
pub(super) fn definition() -> ContractTypeDefinition {
    ContractTypeDefinition {
        id: ContractTypeId::new("content-writing"),
        title: "Content Writing Contract".to_string(),
        description: "Writing and content creation services".to_string(),
        fields: vec![
            FieldSpec::short_text("writerName", "Writer Name"),
            FieldSpec::short_text("writerCompany", "Writer Company").optional(),
            FieldSpec::short_text("clientName", "Client Name"),
            FieldSpec::short_text("clientCompany", "Client Company"),
            FieldSpec::choice("contentType", "Content Type", &[
                "Blog Posts",
                "Website Copy",
                "Marketing Copy",
                "Technical Writing",
                "Social Media Content",
                "Email Marketing",
                "Product Descriptions",
                "Other",
            ]),
            FieldSpec::long_text("contentDescription", "Content Description"),
            FieldSpec::number("wordCount", "Word Count per Piece"),
            FieldSpec::number("articleCount", "Number of Articles/Pieces"),
            FieldSpec::long_text("researchRequired", "Research Requirements").optional(),
            FieldSpec::number("revisionRounds", "Revision Rounds Included").with_default("2"),
            FieldSpec::number("paymentPerPiece", "Payment per Piece ($)"),
            FieldSpec::choice("deliverySchedule", "Delivery Schedule", &[
                "All at once",
                "Weekly delivery",
                "Bi-weekly delivery",
                "Monthly delivery",
            ]),
            FieldSpec::choice("usageRights", "Usage Rights", &[
                "Exclusive rights to client",
                "Non-exclusive usage",
                "Writer retains some rights",
            ]),
        ],
        template: TEMPLATE.to_string(),
        fragments: vec![
            FragmentRule::CompanySuffix {
                source: "writerCompany".to_string(),
                target: Placeholder::named("WRITER_COMPANY_TEXT"),
            },
            FragmentRule::UnitTotal {
                unit_price: "paymentPerPiece".to_string(),
                count: "articleCount".to_string(),
                target: Placeholder::named("TOTAL_PROJECT_VALUE"),
            },
            FragmentRule::DefaultText {
                source: "researchRequired".to_string(),
                target: Placeholder::named("RESEARCH_REQUIREMENTS"),
                fallback: NO_RESEARCH.to_string(),
            },
        ],
    }
}
