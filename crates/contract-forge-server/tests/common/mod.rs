// crates/contract-forge-server/tests/common/mod.rs
// =============================================================================
// Module: Server Test Helpers
// Description: Router builders, request helpers, and capturing sinks.
// Purpose: Drive the axum router in-process with `tower::ServiceExt`.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::body::Bytes;
use axum::http::HeaderMap;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use contract_forge_core::ContractService;
use contract_forge_core::EngineConfig;
use contract_forge_core::InMemoryContractStore;
use contract_forge_core::SharedContractStore;
use contract_forge_core::TemplateRegistry;
use contract_forge_core::Timestamp;
use contract_forge_providers::EmailError;
use contract_forge_providers::EmailMessage;
use contract_forge_providers::EmailOutcome;
use contract_forge_providers::EmailSender;
use contract_forge_providers::GrammarChecker;
use contract_forge_providers::GrammarError;
use contract_forge_providers::Suggestion;
use contract_forge_server::AppState;
use contract_forge_server::AuditEvent;
use contract_forge_server::AuditRecord;
use contract_forge_server::AuditSink;
use contract_forge_server::HttpMetricEvent;
use contract_forge_server::Metrics;
use http_body_util::BodyExt;
use serde_json::Value;
use serde_json::json;
use tower::ServiceExt;

/// Fixed clock reading: 2025-01-01T00:00:00Z.
pub const FIXED_NOW: Timestamp = Timestamp::from_unix_millis(1_735_689_600_000);

/// Body limit used by test routers.
pub const TEST_BODY_LIMIT: usize = 16 * 1024;

/// Clock that always returns [`FIXED_NOW`].
pub fn fixed_clock() -> Timestamp {
    FIXED_NOW
}

/// Builds state over a fresh memory store with the fixed clock.
pub fn memory_state() -> AppState {
    let service = ContractService::new(
        TemplateRegistry::builtin(),
        EngineConfig::default(),
        SharedContractStore::from_store(InMemoryContractStore::new()),
    );
    AppState::new(service).with_clock(fixed_clock)
}

/// Builds a router over `state` with the test body limit.
pub fn app(state: AppState) -> Router {
    contract_forge_server::router(state, TEST_BODY_LIMIT)
}

/// Response parts collected from a router call.
pub struct TestResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Bytes,
}

impl TestResponse {
    /// Parses the body as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// Sends `request` through `app`.
pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    TestResponse {
        status,
        headers,
        body,
    }
}

/// Sends a bodiless GET.
pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder().method(Method::GET).uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// Sends a JSON POST.
pub async fn post_json(app: &Router, uri: &str, payload: &Value) -> TestResponse {
    post_raw(app, uri, serde_json::to_vec(payload).unwrap()).await
}

/// Sends a POST with raw body bytes.
pub async fn post_raw(app: &Router, uri: &str, body: Vec<u8>) -> TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Form answers for the `service` scenario.
pub fn service_form() -> Value {
    json!({
        "serviceProviderName": "Acme",
        "serviceProviderCompany": "Acme LLC",
        "clientName": "Bob",
        "clientCompany": "Bob Inc",
        "serviceDescription": "Consulting",
        "paymentAmount": "5000",
        "paymentSchedule": "Net 30",
        "projectDeadline": "2025-01-01",
        "revisionLimit": "3",
        "latePaymentPenalty": "1.5"
    })
}

/// Generates a `service` contract and returns its id.
pub async fn generate_service(app: &Router) -> String {
    let response = post_json(
        app,
        "/api/contracts/generate",
        &json!({ "contractType": "service", "formData": service_form() }),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    response.json()["contractId"].as_str().unwrap().to_string()
}

/// Audit sink that keeps events in memory.
#[derive(Default)]
pub struct CaptureAudit {
    /// Recorded events.
    events: Mutex<Vec<AuditEvent>>,
}

impl CaptureAudit {
    /// Returns a snapshot of recorded events.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl AuditSink for CaptureAudit {
    fn record(&self, record: &AuditRecord) {
        self.events.lock().unwrap().push(record.event.clone());
    }
}

/// Metrics sink that keeps request events in memory.
#[derive(Default)]
pub struct CaptureMetrics {
    /// Recorded request events.
    requests: Mutex<Vec<HttpMetricEvent>>,
    /// Recorded latency observations.
    latencies: Mutex<Vec<Duration>>,
}

impl CaptureMetrics {
    /// Returns a snapshot of recorded request events.
    pub fn requests(&self) -> Vec<HttpMetricEvent> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns the number of latency observations.
    pub fn latency_count(&self) -> usize {
        self.latencies.lock().unwrap().len()
    }
}

impl Metrics for CaptureMetrics {
    fn record_request(&self, event: &HttpMetricEvent) {
        self.requests.lock().unwrap().push(event.clone());
    }

    fn record_latency(&self, _event: &HttpMetricEvent, latency: Duration) {
        self.latencies.lock().unwrap().push(latency);
    }
}

/// Email sender that records messages and reports them as sent.
#[derive(Default)]
pub struct CaptureEmail {
    /// Sent messages.
    sent: Mutex<Vec<EmailMessage>>,
}

impl CaptureEmail {
    /// Returns a snapshot of sent messages.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for CaptureEmail {
    async fn send(&self, message: &EmailMessage) -> Result<EmailOutcome, EmailError> {
        if !message.to.contains('.') {
            return Err(EmailError::InvalidAddress);
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(EmailOutcome::Sent)
    }
}

/// Email sender whose provider always rejects the message.
pub struct FailingEmail;

#[async_trait]
impl EmailSender for FailingEmail {
    async fn send(&self, _message: &EmailMessage) -> Result<EmailOutcome, EmailError> {
        Err(EmailError::Delivery("provider returned status 500".to_string()))
    }
}

/// Grammar checker whose remote service is always down.
pub struct FailingGrammar;

#[async_trait]
impl GrammarChecker for FailingGrammar {
    async fn check(&self, _text: &str) -> Result<Vec<Suggestion>, GrammarError> {
        Err(GrammarError::Unavailable("connection refused".to_string()))
    }
}

/// Wraps a value in an `Arc` for state builders.
pub fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
