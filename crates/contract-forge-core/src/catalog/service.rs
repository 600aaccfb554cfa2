// crates/contract-forge-core/src/catalog/service.rs
// ============================================================================
// Module: Service Agreement
// Description: Field schema and template for the `service` contract type.
// Purpose: General service contracts with payment terms.
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
const TEMPLATE: &str = r#"SERVICE AGREEMENT

This Service Agreement ("Agreement") is entered into on [DATE] between [SERVICE_PROVIDER_NAME] of [SERVICE_PROVIDER_COMPANY] ("Service Provider") and [CLIENT_NAME] of [CLIENT_COMPANY] ("Client").

1. SERVICES
The Service Provider agrees to provide the following services:
[SERVICE_DESCRIPTION]

2. COMPENSATION
Total compensation: $[PAYMENT_AMOUNT]
Payment terms: [PAYMENT_SCHEDULE]

3. TIMELINE
Project completion deadline: [PROJECT_DEADLINE]

4. REVISIONS
The scope includes [REVISION_LIMIT] rounds of revisions. Additional revisions will be billed at the Service Provider's standard hourly rate.

5. LATE PAYMENT
Late payments are subject to a [LATE_PAYMENT_PENALTY]% monthly service charge.

6. TERMINATION
Either party may terminate this agreement with 30 days written notice.

7. INTELLECTUAL PROPERTY
Upon full payment, all work product becomes the property of the Client.

Service Provider: _________________________
[SERVICE_PROVIDER_NAME]
[SERVICE_PROVIDER_COMPANY]

Client: _________________________
[CLIENT_NAME]
[CLIENT_COMPANY]"#;

// ============================================================================
// SECTION: Definition
// ============================================================================

/// Builds the `service` definition.
pub(super) fn definition() -> ContractTypeDefinition {
    ContractTypeDefinition {
        id: ContractTypeId::new("service"),
        title: "Service Agreement".to_string(),
        description: "General service contracts with payment terms".to_string(),
        fields: vec![
            FieldSpec::short_text("serviceProviderName", "Service Provider Name"),
            FieldSpec::short_text("serviceProviderCompany", "Service Provider Company"),
            FieldSpec::short_text("clientName", "Client Name"),
            FieldSpec::short_text("clientCompany", "Client Company"),
            FieldSpec::long_text("serviceDescription", "Scope of Work"),
            FieldSpec::number("paymentAmount", "Total Amount ($)"),
            FieldSpec::choice("paymentSchedule", "Payment Schedule", &[
                "Net 30",
                "Net 15",
                "50% upfront, 50% on completion",
                "Monthly installments",
            ]),
            FieldSpec::date("projectDeadline", "Project Deadline"),
            FieldSpec::number("revisionLimit", "Number of Revisions Included").with_default("3"),
            FieldSpec::number("latePaymentPenalty", "Late Payment Penalty (%)").with_default("1.5"),
        ],
        template: TEMPLATE.to_string(),
        fragments: Vec::new(),
    }
}
