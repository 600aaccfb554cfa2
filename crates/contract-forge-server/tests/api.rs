// crates/contract-forge-server/tests/api.rs
// ============================================================================
// Module: HTTP API Tests
// Description: Route behavior for catalog, contracts, email, and grammar.
// Purpose: Exercise the router in-process against the memory store.
// Dependencies: contract-forge-server, tower, http-body-util
// ============================================================================

//! ## Overview
//! Drives every route through `tower::ServiceExt::oneshot` with a fixed
//! clock, capturing audit events, metrics, and outbound email in memory.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use axum::http::StatusCode;
use axum::http::header::CONTENT_DISPOSITION;
use axum::http::header::CONTENT_TYPE;
use contract_forge_server::AuditEvent;
use contract_forge_server::RequestOutcome;
use serde_json::Value;
use serde_json::json;

use crate::common::CaptureAudit;
use crate::common::CaptureEmail;
use crate::common::CaptureMetrics;
use crate::common::FIXED_NOW;
use crate::common::FailingEmail;
use crate::common::FailingGrammar;
use crate::common::TEST_BODY_LIMIT;
use crate::common::app;
use crate::common::generate_service;
use crate::common::get;
use crate::common::memory_state;
use crate::common::post_json;
use crate::common::post_raw;
use crate::common::service_form;
use crate::common::shared;

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Verifies the health probe.
#[tokio::test]
async fn health_reports_ok() {
    let app = app(memory_state());
    let response = get(&app, "/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "status": "ok" }));
}

/// Verifies the catalog lists all types in order.
#[tokio::test]
async fn contract_types_are_listed_in_catalog_order() {
    let app = app(memory_state());
    let response = get(&app, "/api/contract-types").await;
    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    let ids: Vec<&str> =
        body.as_array().unwrap().iter().map(|item| item["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec![
        "nda",
        "service",
        "freelance",
        "web-dev",
        "graphic-design",
        "content-writing",
        "consulting",
        "payment-terms"
    ]);
    assert_eq!(body[0]["title"], "Non-Disclosure Agreement");
}

/// Verifies a definition carries its schema and template.
#[tokio::test]
async fn contract_type_definition_is_served() {
    let app = app(memory_state());
    let response = get(&app, "/api/contract-types/nda").await;
    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["id"], "nda");
    assert_eq!(body["fields"][0]["id"], "disclosingPartyName");
    assert!(body["template"].as_str().unwrap().contains("[DATE]"));

    let missing = get(&app, "/api/contract-types/lease").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.json()["message"], "Contract type not found");
}

// ============================================================================
// SECTION: Preview and Generation
// ============================================================================

/// Verifies preview stamps the current instant and echoes it.
#[tokio::test]
async fn preview_stamps_and_echoes_issued_at() {
    let app = app(memory_state());
    let response = post_json(
        &app,
        "/api/contracts/preview",
        &json!({ "contractType": "service", "formData": service_form() }),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["issuedAt"], FIXED_NOW.unix_millis());
    let content = body["content"].as_str().unwrap();
    assert!(content.contains("1/1/2025"));
    assert!(content.contains("Acme"));
}

/// Verifies a generate call with the echoed instant matches the preview.
#[tokio::test]
async fn generate_with_echoed_issued_at_matches_preview() {
    let app = app(memory_state());
    let issued_at = FIXED_NOW.unix_millis() - 3_600_000;
    let payload =
        json!({ "contractType": "service", "formData": service_form(), "issuedAt": issued_at });
    let preview = post_json(&app, "/api/contracts/preview", &payload).await.json();
    let generated = post_json(&app, "/api/contracts/generate", &payload).await;
    assert_eq!(generated.status, StatusCode::OK);
    assert_eq!(preview["issuedAt"], issued_at);
    assert_eq!(generated.json()["content"], preview["content"]);
}

/// Verifies an `issuedAt` outside the skew window is refused.
#[tokio::test]
async fn issued_at_outside_window_is_rejected() {
    let app = app(memory_state().with_max_issued_at_skew_ms(60_000));
    let payload = json!({
        "contractType": "service",
        "formData": service_form(),
        "issuedAt": FIXED_NOW.unix_millis() - 120_000
    });
    let response = post_json(&app, "/api/contracts/generate", &payload).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["message"], "issuedAt is outside the accepted window");
}

/// Verifies validation failures return per-field errors.
#[tokio::test]
async fn invalid_answers_return_field_errors() {
    let app = app(memory_state());
    let mut form = service_form();
    form["clientName"] = json!("   ");
    form["paymentAmount"] = json!("-1");
    let response = post_json(
        &app,
        "/api/contracts/generate",
        &json!({ "contractType": "service", "formData": form }),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let body = response.json();
    assert_eq!(body["message"], "Invalid form data");
    let errors = body["errors"].as_array().unwrap();
    assert!(errors.contains(&json!({
        "fieldId": "clientName",
        "code": "required",
        "message": "This field is required."
    })));
    assert!(errors.iter().any(|error| error["fieldId"] == "paymentAmount"
        && error["code"] == "invalid_number"));
}

/// Verifies unknown types and malformed bodies are client errors.
#[tokio::test]
async fn unknown_type_and_malformed_bodies_are_rejected() {
    let app = app(memory_state());
    let unknown = post_json(
        &app,
        "/api/contracts/preview",
        &json!({ "contractType": "lease", "formData": {} }),
    )
    .await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown.json()["message"], "Unknown contract type: lease");
    assert!(unknown.json().get("errors").is_none());

    let nested = post_json(
        &app,
        "/api/contracts/generate",
        &json!({ "contractType": "service", "formData": { "clientName": ["Bob"] } }),
    )
    .await;
    assert_eq!(nested.status, StatusCode::BAD_REQUEST);
    assert_eq!(nested.json()["message"], "Invalid form data");

    let garbage = post_raw(&app, "/api/contracts/generate", b"{not json".to_vec()).await;
    assert_eq!(garbage.status, StatusCode::BAD_REQUEST);
}

/// Verifies oversized bodies are refused with 413.
#[tokio::test]
async fn oversized_body_is_rejected() {
    let app = app(memory_state());
    let text = "a".repeat(TEST_BODY_LIMIT + 1);
    let response = post_json(&app, "/api/grammar-check", &json!({ "text": text })).await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.json()["message"], "Request body too large");
}

// ============================================================================
// SECTION: Record Lifecycle
// ============================================================================

/// Verifies the service scenario from generation through export.
#[tokio::test]
async fn service_contract_lifecycle() {
    let app = app(memory_state());
    let id = generate_service(&app).await;

    let record = get(&app, &format!("/api/contracts/{id}")).await;
    assert_eq!(record.status, StatusCode::OK);
    let body = record.json();
    let content = body["content"].as_str().unwrap().to_string();
    for expected in ["Acme", "$5000", "Net 30", "3 rounds"] {
        assert!(content.contains(expected), "missing {expected}");
    }
    assert_eq!(body["contractType"], "service");
    assert_eq!(body["downloadCount"], 0);
    assert_eq!(body["createdAt"], FIXED_NOW.unix_millis());

    for _ in 0 .. 2 {
        let download = post_raw(&app, &format!("/api/contracts/{id}/download"), Vec::new()).await;
        assert_eq!(download.status, StatusCode::OK);
        assert_eq!(download.json()["message"], "Download recorded");
    }
    let record = get(&app, &format!("/api/contracts/{id}")).await.json();
    assert_eq!(record["downloadCount"], 2);

    let pdf = get(&app, &format!("/api/contracts/{id}/export?format=pdf")).await;
    assert_eq!(pdf.status, StatusCode::OK);
    assert_eq!(pdf.headers[CONTENT_TYPE], "application/pdf");
    assert_eq!(
        pdf.headers[CONTENT_DISPOSITION].to_str().unwrap(),
        format!("attachment; filename=\"contract-{id}-2025-01-01.pdf\"")
    );
    assert!(pdf.body.starts_with(b"%PDF-"));
    assert!(lopdf::Document::load_mem(&pdf.body).is_ok());

    let text = get(&app, &format!("/api/contracts/{id}/export?format=text")).await;
    assert_eq!(text.status, StatusCode::OK);
    assert_eq!(text.body.as_ref(), content.as_bytes());

    let word = get(&app, &format!("/api/contracts/{id}/export?format=word")).await;
    assert_eq!(word.headers[CONTENT_TYPE], "application/msword");
}

/// Verifies export defaults to PDF and rejects unknown formats.
#[tokio::test]
async fn export_format_defaults_and_rejections() {
    let app = app(memory_state());
    let id = generate_service(&app).await;
    let default = get(&app, &format!("/api/contracts/{id}/export")).await;
    assert_eq!(default.headers[CONTENT_TYPE], "application/pdf");

    let unknown = get(&app, &format!("/api/contracts/{id}/export?format=rtf")).await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown.json()["message"], "Unsupported export format");
}

/// Verifies unknown record ids are 404 on every record route.
#[tokio::test]
async fn unknown_records_are_not_found() {
    let app = app(memory_state().with_email(shared(CaptureEmail::default())));
    let checks = [
        get(&app, "/api/contracts/missing").await,
        post_raw(&app, "/api/contracts/missing/download", Vec::new()).await,
        get(&app, "/api/contracts/missing/export?format=text").await,
        post_json(&app, "/api/contracts/missing/email", &json!({ "email": "a@b.com" })).await,
    ];
    for response in checks {
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.json()["message"], "Contract not found");
    }
}

// ============================================================================
// SECTION: Email
// ============================================================================

/// Verifies a configured sender delivers the stored document.
#[tokio::test]
async fn email_sends_stored_document() {
    let email = shared(CaptureEmail::default());
    let app = app(memory_state().with_email(email.clone()));
    let id = generate_service(&app).await;
    let response =
        post_json(&app, &format!("/api/contracts/{id}/email"), &json!({ "email": "c@d.com" }))
            .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["message"], "Contract sent successfully");
    let sent = email.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "c@d.com");
    assert_eq!(sent[0].subject, "Your SERVICE Contract");
    assert!(sent[0].text_body.contains("Acme"));
}

/// Verifies email failure modes map to client or server errors.
#[tokio::test]
async fn email_failures_map_to_status_codes() {
    let capture = app(memory_state().with_email(shared(CaptureEmail::default())));
    let id = generate_service(&capture).await;
    let uri = format!("/api/contracts/{id}/email");

    let missing = post_json(&capture, &uri, &json!({})).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.json()["message"], "Email address is required");

    let malformed = post_json(&capture, &uri, &json!({ "email": "a@b" })).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    let disabled = app(memory_state());
    let id = generate_service(&disabled).await;
    let response = post_json(
        &disabled,
        &format!("/api/contracts/{id}/email"),
        &json!({ "email": "a@b.com" }),
    )
    .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json()["message"], "Email delivery is not configured");

    let failing = app(memory_state().with_email(shared(FailingEmail)));
    let id = generate_service(&failing).await;
    let response = post_json(
        &failing,
        &format!("/api/contracts/{id}/email"),
        &json!({ "email": "a@b.com" }),
    )
    .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json()["message"], "Failed to send email");
}

// ============================================================================
// SECTION: Grammar
// ============================================================================

/// Verifies builtin suggestions are returned.
#[tokio::test]
async fn grammar_check_returns_suggestions() {
    let app = app(memory_state());
    let response =
        post_json(&app, "/api/grammar-check", &json!({ "text": "We  recieve it." })).await;
    assert_eq!(response.status, StatusCode::OK);
    let suggestions = response.json()["suggestions"].as_array().unwrap().clone();
    let rules: Vec<&str> = suggestions.iter().map(|item| item["rule"].as_str().unwrap()).collect();
    assert_eq!(rules, vec!["double_space", "spelling"]);
    assert_eq!(suggestions[1]["offset"], 4);
}

/// Verifies missing text is the only client error.
#[tokio::test]
async fn grammar_check_requires_text() {
    let app = app(memory_state());
    for payload in [json!({}), json!({ "text": "" })] {
        let response = post_json(&app, "/api/grammar-check", &payload).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json()["message"], "Text is required");
    }
}

/// Verifies a failing checker degrades to no suggestions.
#[tokio::test]
async fn grammar_failure_degrades_to_empty_suggestions() {
    let audit = shared(CaptureAudit::default());
    let app = app(memory_state().with_grammar(shared(FailingGrammar)).with_audit(audit.clone()));
    let response = post_json(&app, "/api/grammar-check", &json!({ "text": "Anything" })).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "suggestions": [] }));
    assert!(audit.events().iter().any(|event| matches!(
        event,
        AuditEvent::GrammarDegraded { reason } if reason.contains("connection refused")
    )));
}

// ============================================================================
// SECTION: Observation
// ============================================================================

/// Verifies lifecycle audit events and route-template request events.
#[tokio::test]
async fn requests_are_audited_by_route_template() {
    let audit = shared(CaptureAudit::default());
    let app = app(memory_state().with_audit(audit.clone()));
    let id = generate_service(&app).await;
    post_raw(&app, &format!("/api/contracts/{id}/download"), Vec::new()).await;
    get(&app, "/no/such/route").await;

    let events = audit.events();
    assert!(events.iter().any(|event| matches!(
        event,
        AuditEvent::ContractGenerated { contract_id, contract_type, content_hash }
            if *contract_id == id && contract_type == "service" && content_hash.len() == 64
    )));
    assert!(events.contains(&AuditEvent::ContractDownloaded {
        contract_id: id.clone(),
    }));
    let routes: Vec<(String, u16)> = events
        .iter()
        .filter_map(|event| match event {
            AuditEvent::HttpRequest { route, status, .. } => Some((route.clone(), *status)),
            _ => None,
        })
        .collect();
    assert_eq!(routes, vec![
        ("/api/contracts/generate".to_string(), 200),
        ("/api/contracts/{id}/download".to_string(), 200),
        ("unmatched".to_string(), 404),
    ]);
}

/// Verifies metrics see every request with its outcome class.
#[tokio::test]
async fn metrics_record_requests_and_latencies() {
    let metrics = shared(CaptureMetrics::default());
    let app = app(memory_state().with_metrics(metrics.clone()));
    get(&app, "/health").await;
    get(&app, "/api/contracts/missing").await;

    let requests = metrics.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].route, "/health");
    assert_eq!(requests[0].outcome, RequestOutcome::Ok);
    assert_eq!(requests[1].route, "/api/contracts/{id}");
    assert_eq!(requests[1].outcome, RequestOutcome::ClientError);
    assert_eq!(metrics.latency_count(), 2);
}

/// Verifies unknown routes return the JSON error shape.
#[tokio::test]
async fn unknown_routes_return_json_404() {
    let app = app(memory_state());
    let response = get(&app, "/api/nothing").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], "Not found");
}
