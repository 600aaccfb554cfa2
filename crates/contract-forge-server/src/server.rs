// crates/contract-forge-server/src/server.rs
// ============================================================================
// Module: HTTP Server
// Description: Configured server lifecycle for the contract API.
// Purpose: Validate config, assemble state, and serve the router over TCP.
// Dependencies: axum, contract-forge-config, tokio
// ============================================================================

//! ## Overview
//! [`ContractForgeServer`] owns a validated configuration and the assembled
//! [`AppState`]. Serving binds the configured address, reports startup
//! posture through the audit sink, and shuts down cleanly on Ctrl-C.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;

use axum::Router;
use contract_forge_config::ContractForgeConfig;
use contract_forge_config::EmailProvider;
use contract_forge_config::StoreType;

use crate::audit::AuditEvent;
use crate::error::ServerError;
use crate::routes::router;
use crate::state::AppState;

// ============================================================================
// SECTION: Server
// ============================================================================

/// Contract Forge HTTP server instance.
pub struct ContractForgeServer {
    /// Server configuration.
    config: ContractForgeConfig,
    /// Handler state.
    state: AppState,
}

impl ContractForgeServer {
    /// Builds a server from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when validation or initialization fails.
    pub fn from_config(mut config: ContractForgeConfig) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let state = AppState::from_config(&config)?;
        Ok(Self {
            config,
            state,
        })
    }

    /// Returns the configured router without binding a socket.
    #[must_use]
    pub fn router(&self) -> Router {
        router(self.state.clone(), self.config.server.max_body_bytes)
    }

    /// Serves requests until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let addr = self
            .config
            .server
            .bind_addr()
            .map_err(|err| ServerError::Config(err.to_string()))?;
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| ServerError::Transport(format!("http bind failed: {err}")))?;
        let local = listener
            .local_addr()
            .map_err(|err| ServerError::Transport(format!("http bind failed: {err}")))?;
        self.state.audit.emit(AuditEvent::ServerStart {
            bind: local.to_string(),
            warnings: startup_warnings(&self.config, local),
        });
        let app = self.router();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|err| ServerError::Transport(format!("http server failed: {err}")))
    }
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

// ============================================================================
// SECTION: Startup Posture
// ============================================================================

/// Lists configuration choices an operator should know about at startup.
#[must_use]
pub fn startup_warnings(config: &ContractForgeConfig, bind: SocketAddr) -> Vec<String> {
    let mut warnings = Vec::new();
    if !bind.ip().is_loopback() {
        warnings.push(format!("listening on non-loopback address {bind} without authentication"));
    }
    if config.store.store_type == StoreType::Memory {
        warnings.push("memory store does not persist contracts across restarts".to_string());
    }
    match config.email.provider {
        EmailProvider::Disabled => warnings.push("email delivery is disabled".to_string()),
        EmailProvider::Sendgrid if config.email.api_key().is_none() => warnings.push(format!(
            "email provider is sendgrid but {} is not set",
            config.email.api_key_env
        )),
        EmailProvider::Sendgrid => {}
    }
    warnings
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_warns_about_memory_store_and_email() {
        let config = ContractForgeConfig::default();
        let warnings = startup_warnings(&config, SocketAddr::from(([127, 0, 0, 1], 8080)));
        assert_eq!(warnings, vec![
            "memory store does not persist contracts across restarts".to_string(),
            "email delivery is disabled".to_string(),
        ]);
    }

    #[test]
    fn public_bind_is_flagged() {
        let config = ContractForgeConfig::default();
        let warnings = startup_warnings(&config, SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert!(warnings[0].starts_with("listening on non-loopback address 0.0.0.0:8080"));
    }
}
