// crates/contract-forge-server/src/routes.rs
// ============================================================================
// Module: HTTP Routes
// Description: Axum router and handlers for the contract API.
// Purpose: Expose catalog, preview, generation, record, and provider routes.
// Dependencies: axum, contract-forge-core, contract-forge-providers, serde
// ============================================================================

//! ## Overview
//! Request bodies are read as raw bytes under a size limit and parsed here, so
//! oversized and malformed bodies share the JSON error format of every other
//! failure. Store access runs on a blocking-capable thread when the runtime
//! allows it. Every request is observed once for audit and metrics.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::DefaultBodyLimit;
use axum::extract::MatchedPath;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::Request;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::header::CONTENT_DISPOSITION;
use axum::http::header::CONTENT_LENGTH;
use axum::http::header::CONTENT_TYPE;
use axum::middleware;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use contract_forge_core::ContractId;
use contract_forge_core::ContractTypeDefinition;
use contract_forge_core::ContractTypeId;
use contract_forge_core::ContractTypeSummary;
use contract_forge_core::ExportFormat;
use contract_forge_core::ExportRequest;
use contract_forge_core::FormAnswers;
use contract_forge_core::GenerateRequest;
use contract_forge_core::GeneratedContract;
use contract_forge_core::Timestamp;
use contract_forge_providers::EmailError;
use contract_forge_providers::EmailMessage;
use contract_forge_providers::EmailOutcome;
use contract_forge_providers::Suggestion;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::runtime::Handle;
use tokio::runtime::RuntimeFlavor;

use crate::audit::AuditEvent;
use crate::error::ApiError;
use crate::state::AppState;
use crate::telemetry::HttpMetricEvent;
use crate::telemetry::RequestOutcome;

// ============================================================================
// SECTION: Router
// ============================================================================

/// Shared handler state.
type SharedState = Arc<AppState>;

/// Builds the API router with a request body limit of `max_body_bytes`.
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    let state = Arc::new(state);
    Router::new()
        .route("/health", get(health))
        .route("/api/contract-types", get(list_contract_types))
        .route("/api/contract-types/{id}", get(get_contract_type))
        .route("/api/contracts/preview", post(preview_contract))
        .route("/api/contracts/generate", post(generate_contract))
        .route("/api/contracts/{id}", get(get_contract))
        .route("/api/contracts/{id}/download", post(record_download))
        .route("/api/contracts/{id}/export", get(export_contract))
        .route("/api/contracts/{id}/email", post(email_contract))
        .route("/api/grammar-check", post(check_grammar))
        .fallback(route_not_found)
        .layer(middleware::from_fn_with_state(Arc::clone(&state), observe_request))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

// ============================================================================
// SECTION: Payloads
// ============================================================================

/// Preview and generation request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContractRequest {
    /// Contract type identifier.
    contract_type: ContractTypeId,
    /// Form answers.
    form_data: FormAnswers,
    /// Generation instant echoed from a previous preview.
    #[serde(default)]
    issued_at: Option<Timestamp>,
}

/// Preview response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PreviewResponse {
    /// Resolved document text.
    content: String,
    /// Instant used for the date stamp.
    issued_at: Timestamp,
}

/// Generation response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    /// Stored record identifier.
    contract_id: ContractId,
    /// Resolved document text.
    content: String,
}

/// Email request body.
#[derive(Debug, Deserialize)]
struct EmailRequest {
    /// Destination address.
    #[serde(default)]
    email: Option<String>,
}

/// Grammar request body.
#[derive(Debug, Deserialize)]
struct GrammarRequest {
    /// Text to check.
    #[serde(default)]
    text: Option<String>,
}

/// Grammar response body.
#[derive(Debug, Serialize)]
struct GrammarResponse {
    /// Advisory suggestions.
    suggestions: Vec<Suggestion>,
}

/// Export query string.
#[derive(Debug, Deserialize)]
struct ExportQuery {
    /// Export format label; defaults to PDF.
    #[serde(default)]
    format: Option<String>,
}

/// Plain acknowledgement body.
#[derive(Debug, Serialize)]
struct MessageResponse {
    /// Acknowledgement text.
    message: &'static str,
}

/// Health response body.
#[derive(Debug, Serialize)]
struct HealthResponse {
    /// Always `ok`.
    status: &'static str,
}

// ============================================================================
// SECTION: Catalog Handlers
// ============================================================================

/// `GET /health`.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
    })
}

/// `GET /api/contract-types`.
async fn list_contract_types(State(state): State<SharedState>) -> Json<Vec<ContractTypeSummary>> {
    Json(state.service.registry().list_types())
}

/// `GET /api/contract-types/{id}`.
async fn get_contract_type(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<ContractTypeDefinition>, ApiError> {
    state
        .service
        .registry()
        .definition(&id)
        .map(|definition| Json(definition.clone()))
        .map_err(|_| ApiError::new(StatusCode::NOT_FOUND, "Contract type not found"))
}

// ============================================================================
// SECTION: Contract Handlers
// ============================================================================

/// `POST /api/contracts/preview`.
async fn preview_contract(
    State(state): State<SharedState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let request: ContractRequest = parse_json(body, "Invalid form data")?;
    let issued_at = resolve_issued_at(&state, request.issued_at)?;
    let generate = GenerateRequest {
        contract_type: request.contract_type,
        answers: request.form_data,
        issued_at,
    };
    let content = state
        .service
        .preview(&generate)
        .map_err(|err| ApiError::from_service(err, "preview contract"))?;
    Ok(Json(PreviewResponse {
        content,
        issued_at,
    }))
}

/// `POST /api/contracts/generate`.
async fn generate_contract(
    State(state): State<SharedState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let request: ContractRequest = parse_json(body, "Invalid form data")?;
    let issued_at = resolve_issued_at(&state, request.issued_at)?;
    let generate = GenerateRequest {
        contract_type: request.contract_type,
        answers: request.form_data,
        issued_at,
    };
    let created_at = state.now();
    let record = run_blocking(|| state.service.generate(generate, created_at))
        .map_err(|err| ApiError::from_service(err, "generate contract"))?;
    state.audit.emit(AuditEvent::ContractGenerated {
        contract_id: record.id.to_string(),
        contract_type: record.contract_type.to_string(),
        content_hash: record.content_hash.value.clone(),
    });
    Ok(Json(GenerateResponse {
        contract_id: record.id,
        content: record.content,
    }))
}

/// `GET /api/contracts/{id}`.
async fn get_contract(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<GeneratedContract>, ApiError> {
    load_contract(&state, &ContractId::new(id), "retrieve contract").map(Json)
}

/// `POST /api/contracts/{id}/download`.
async fn record_download(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = ContractId::new(id);
    let existed = run_blocking(|| state.service.record_download(&id))
        .map_err(|err| ApiError::from_service(err, "track download"))?;
    if !existed {
        return Err(ApiError::contract_not_found());
    }
    state.audit.emit(AuditEvent::ContractDownloaded {
        contract_id: id.to_string(),
    });
    Ok(Json(MessageResponse {
        message: "Download recorded",
    }))
}

/// `GET /api/contracts/{id}/export?format=`.
async fn export_contract(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let format: ExportFormat = query
        .format
        .as_deref()
        .unwrap_or("pdf")
        .parse()
        .map_err(|_| ApiError::bad_request("Unsupported export format"))?;
    let record = load_contract(&state, &ContractId::new(id), "retrieve contract")?;
    let request = ExportRequest {
        contract_id: &record.id,
        content: &record.content,
        format,
        exported_at: state.now(),
    };
    let artifact = state
        .exporter
        .export(&request)
        .map_err(|_| ApiError::internal("Failed to export contract"))?;
    let disposition =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", artifact.file_name))
            .map_err(|_| ApiError::internal("Failed to export contract"))?;
    state.audit.emit(AuditEvent::ContractExported {
        contract_id: record.id.to_string(),
        format: format.as_str().to_string(),
        bytes: artifact.bytes.len(),
    });
    let headers = [
        (CONTENT_TYPE, HeaderValue::from_static(artifact.content_type)),
        (CONTENT_DISPOSITION, disposition),
    ];
    Ok((headers, artifact.bytes).into_response())
}

/// `POST /api/contracts/{id}/email`.
async fn email_contract(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let request: EmailRequest = parse_json(body, "Email address is required")?;
    let Some(address) = request.email.filter(|email| !email.trim().is_empty()) else {
        return Err(ApiError::bad_request("Email address is required"));
    };
    let record = load_contract(&state, &ContractId::new(id), "send contract email")?;
    let message = EmailMessage::for_contract(&address, &record.contract_type, &record.content);
    let result = state.email.send(&message).await;
    let outcome = match &result {
        Ok(outcome) => outcome.as_str(),
        Err(EmailError::InvalidAddress) => "invalid_address",
        Err(_) => "failed",
    };
    state.audit.emit(AuditEvent::EmailDispatch {
        contract_id: record.id.to_string(),
        outcome: outcome.to_string(),
    });
    match result {
        Ok(EmailOutcome::Sent) => Ok(Json(MessageResponse {
            message: "Contract sent successfully",
        })),
        Ok(EmailOutcome::NotConfigured) => {
            Err(ApiError::internal("Email delivery is not configured"))
        }
        Err(EmailError::InvalidAddress) => {
            Err(ApiError::bad_request("Please enter a valid email address."))
        }
        Err(_) => Err(ApiError::internal("Failed to send email")),
    }
}

// ============================================================================
// SECTION: Grammar Handler
// ============================================================================

/// `POST /api/grammar-check`.
async fn check_grammar(
    State(state): State<SharedState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<GrammarResponse>, ApiError> {
    let request: GrammarRequest = parse_json(body, "Text is required")?;
    let Some(text) = request.text.filter(|text| !text.is_empty()) else {
        return Err(ApiError::bad_request("Text is required"));
    };
    let suggestions = match state.grammar.check(&text).await {
        Ok(suggestions) => suggestions,
        Err(err) => {
            state.audit.emit(AuditEvent::GrammarDegraded {
                reason: err.to_string(),
            });
            Vec::new()
        }
    };
    Ok(Json(GrammarResponse {
        suggestions,
    }))
}

/// Fallback for unknown routes.
async fn route_not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Not found")
}

// ============================================================================
// SECTION: Observation
// ============================================================================

/// Records audit and metrics for every request.
async fn observe_request(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |path| path.as_str().to_string());
    let request_bytes = request
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(0);
    let response = next.run(request).await;
    let latency = started.elapsed();
    let status = response.status().as_u16();
    let event = HttpMetricEvent {
        method,
        route,
        status,
        outcome: RequestOutcome::from_status(status),
        request_bytes,
    };
    state.metrics.record_request(&event);
    state.metrics.record_latency(&event, latency);
    state.audit.emit(AuditEvent::HttpRequest {
        method: event.method,
        route: event.route,
        status,
        latency_ms: u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
        request_bytes,
    });
    response
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a JSON request body, mapping read failures to 413 or 400.
fn parse_json<T: DeserializeOwned>(
    body: Result<Bytes, BytesRejection>,
    invalid_message: &str,
) -> Result<T, ApiError> {
    let bytes = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
        } else {
            ApiError::bad_request("Unreadable request body")
        }
    })?;
    serde_json::from_slice(&bytes).map_err(|_| ApiError::bad_request(invalid_message))
}

/// Chooses the generation instant: the echoed `issuedAt` when it lies within
/// the skew bound, otherwise now.
fn resolve_issued_at(
    state: &AppState,
    issued_at: Option<Timestamp>,
) -> Result<Timestamp, ApiError> {
    let now = state.now();
    match issued_at {
        None => Ok(now),
        Some(issued_at) if issued_at.distance_millis(now) <= state.max_issued_at_skew_ms => {
            Ok(issued_at)
        }
        Some(_) => Err(ApiError::bad_request("issuedAt is outside the accepted window")),
    }
}

/// Loads a record or fails with 404.
fn load_contract(
    state: &AppState,
    id: &ContractId,
    action: &str,
) -> Result<GeneratedContract, ApiError> {
    run_blocking(|| state.service.get(id))
        .map_err(|err| ApiError::from_service(err, action))?
        .ok_or_else(ApiError::contract_not_found)
}

/// Runs store work, shifting to a blocking context on multi-thread runtimes.
fn run_blocking<T>(work: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(work)
        }
        _ => work(),
    }
}
