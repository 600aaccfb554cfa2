// crates/contract-forge-providers/src/email.rs
// ============================================================================
// Module: Email Delivery
// Description: Email sender interface with SendGrid and disabled backends.
// Purpose: Deliver generated contracts by email without blocking generation.
// Dependencies: contract-forge-core, async-trait, reqwest, serde_json
// ============================================================================

//! ## Overview
//! Senders validate the destination address before any network activity.
//! A sender without credentials reports [`EmailOutcome::NotConfigured`]
//! instead of failing, so hosts can tell "not sent" apart from "broken".

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use contract_forge_core::ContractTypeId;
use contract_forge_core::is_valid_email;
use contract_forge_core::push_html_escaped;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::header::HeaderValue;
use reqwest::redirect::Policy;
use serde_json::json;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default sender address.
pub const DEFAULT_FROM_ADDRESS: &str = "noreply@contractgen.com";
/// Default `SendGrid` v3 mail send endpoint.
pub const DEFAULT_SENDGRID_ENDPOINT: &str = "https://api.sendgrid.com/v3/mail/send";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Destination address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text_body: String,
    /// HTML body.
    pub html_body: String,
}

impl EmailMessage {
    /// Builds the message that delivers a generated contract.
    #[must_use]
    pub fn for_contract(to: &str, contract_type: &ContractTypeId, content: &str) -> Self {
        let mut html_body =
            String::from("<pre style=\"font-family: monospace; white-space: pre-wrap;\">");
        push_html_escaped(&mut html_body, content);
        html_body.push_str("</pre>");
        Self {
            to: to.trim().to_string(),
            subject: format!("Your {} Contract", contract_type.as_str().to_uppercase()),
            text_body: content.to_string(),
            html_body,
        }
    }
}

/// Result of a send attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailOutcome {
    /// The provider accepted the message.
    Sent,
    /// No credentials are configured; nothing was sent.
    NotConfigured,
}

impl EmailOutcome {
    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::NotConfigured => "not_configured",
        }
    }
}

/// Email delivery errors.
#[derive(Debug, Error)]
pub enum EmailError {
    /// Destination address is malformed.
    #[error("invalid email address")]
    InvalidAddress,
    /// The provider rejected or did not answer the request.
    #[error("email delivery failed: {0}")]
    Delivery(String),
    /// The HTTP client could not be built.
    #[error("email client error: {0}")]
    Client(String),
}

/// Email sender interface.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Sends a message.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError`] for malformed addresses or delivery failures.
    async fn send(&self, message: &EmailMessage) -> Result<EmailOutcome, EmailError>;
}

// ============================================================================
// SECTION: Disabled Sender
// ============================================================================

/// Sender used when email delivery is turned off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledEmailSender;

#[async_trait]
impl EmailSender for DisabledEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<EmailOutcome, EmailError> {
        ensure_valid_address(&message.to)?;
        Ok(EmailOutcome::NotConfigured)
    }
}

// ============================================================================
// SECTION: SendGrid Sender
// ============================================================================

/// Configuration for the `SendGrid` sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendGridConfig {
    /// Mail send endpoint.
    pub endpoint: String,
    /// Sender address.
    pub from_address: String,
    /// API key; `None` disables delivery.
    pub api_key: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for SendGridConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SENDGRID_ENDPOINT.to_string(),
            from_address: DEFAULT_FROM_ADDRESS.to_string(),
            api_key: None,
            timeout_ms: 10_000,
        }
    }
}

/// `SendGrid` v3 API sender.
pub struct SendGridEmailSender {
    /// Sender configuration.
    config: SendGridConfig,
    /// HTTP client configured with timeouts.
    client: Client,
}

impl SendGridEmailSender {
    /// Creates a `SendGrid` sender.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError::Client`] when the HTTP client cannot be built.
    pub fn new(config: SendGridConfig) -> Result<Self, EmailError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .redirect(Policy::none())
            .build()
            .map_err(|err| EmailError::Client(err.to_string()))?;
        Ok(Self {
            config,
            client,
        })
    }
}

#[async_trait]
impl EmailSender for SendGridEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<EmailOutcome, EmailError> {
        ensure_valid_address(&message.to)?;
        let Some(api_key) = self.config.api_key.as_deref().filter(|key| !key.trim().is_empty())
        else {
            return Ok(EmailOutcome::NotConfigured);
        };
        let auth = HeaderValue::from_str(&format!("Bearer {}", api_key.trim()))
            .map_err(|_| EmailError::Client("api key is not a valid header value".to_string()))?;
        let payload = json!({
            "personalizations": [{ "to": [{ "email": message.to }] }],
            "from": { "email": self.config.from_address },
            "subject": message.subject,
            "content": [
                { "type": "text/plain", "value": message.text_body },
                { "type": "text/html", "value": message.html_body },
            ],
        });
        let response = self
            .client
            .post(&self.config.endpoint)
            .header(AUTHORIZATION, auth)
            .json(&payload)
            .send()
            .await
            .map_err(|err| EmailError::Delivery(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            Ok(EmailOutcome::Sent)
        } else {
            Err(EmailError::Delivery(format!("provider returned status {}", status.as_u16())))
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Rejects malformed destination addresses.
fn ensure_valid_address(address: &str) -> Result<(), EmailError> {
    if is_valid_email(address.trim()) { Ok(()) } else { Err(EmailError::InvalidAddress) }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
