// crates/contract-forge-core/src/catalog/payment_terms.rs
// ============================================================================
// Module: Payment Terms Agreement
// Description: Field schema and template for the `payment-terms` contract type.
// Purpose: Standalone payment and billing agreements.
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
const TEMPLATE: &str = r#"PAYMENT TERMS AGREEMENT

This Payment Terms Agreement ("Agreement") is entered into on [DATE] between [SERVICE_PROVIDER_NAME] of [SERVICE_PROVIDER_COMPANY] ("Provider") and [CLIENT_NAME] of [CLIENT_COMPANY] ("Client").

1. SERVICES/PRODUCTS
[SERVICE_DESCRIPTION]

2. PAYMENT TERMS
Standard payment terms: [PAYMENT_TERMS]
Invoice frequency: [INVOICE_FREQUENCY]

3. ACCEPTED PAYMENT METHODS
[ACCEPTED_PAYMENT_METHODS]

4. LATE PAYMENT
Late payment fee: [LATE_PAYMENT_FEE]% per month on outstanding balances
Accounts over 60 days overdue may be subject to collection proceedings

5. DISPUTE RESOLUTION
Payment disputes will be resolved through: [DISPUTE_RESOLUTION]

6. MODIFICATION
Payment terms may only be modified in writing with both parties' consent.

7. GOVERNING LAW
This agreement is governed by applicable commercial law.

Service Provider: _________________________
[SERVICE_PROVIDER_NAME]
[SERVICE_PROVIDER_COMPANY]

Client: _________________________
[CLIENT_NAME]
[CLIENT_COMPANY]"#;

// ============================================================================
// SECTION: Definition
// ============================================================================

/// Builds the `payment-terms` definition.
pub(super) fn definition() -> ContractTypeDefinition {
    ContractTypeDefinition {
        id: ContractTypeId::new("payment-terms"),
        title: "Payment Terms Agreement".to_string(),
        description: "Standalone payment and billing agreements".to_string(),
        fields: vec![
            FieldSpec::short_text("serviceProviderName", "Service Provider Name"),
            FieldSpec::short_text("serviceProviderCompany", "Service Provider Company"),
            FieldSpec::short_text("clientName", "Client Name"),
            FieldSpec::short_text("clientCompany", "Client Company"),
            FieldSpec::long_text("serviceDescription", "Services/Products Description"),
            FieldSpec::choice("paymentTerms", "Payment Terms", &[
                "Net 15",
                "Net 30",
                "Net 45",
                "Due on receipt",
                "50% upfront, 50% on completion",
            ]),
            FieldSpec::number("latePaymentFee", "Late Payment Fee (%)").with_default("1.5"),
            FieldSpec::long_text("acceptedPaymentMethods", "Accepted Payment Methods")
                .with_default("Bank transfer, check, credit card"),
            FieldSpec::choice("invoiceFrequency", "Invoice Frequency", &[
                "Per project",
                "Weekly",
                "Bi-weekly",
                "Monthly",
                "Quarterly",
            ]),
            FieldSpec::choice("disputeResolution", "Dispute Resolution", &[
                "Direct negotiation",
                "Mediation",
                "Arbitration",
                "Legal proceedings",
            ]),
        ],
        template: TEMPLATE.to_string(),
        fragments: Vec::new(),
    }
}
