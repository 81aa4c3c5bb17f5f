//! # Script Gateway
//!
//! The single-function HTTP adapter in front of the script endpoint.
//!
//! ## Call Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Gateway Call Flow                                 │
//! │                                                                         │
//! │  send(action, payload)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  POST { action, data, timestamp }  ──►  script endpoint (one URL)      │
//! │       │                                                                 │
//! │       ├── timeout (30s) ────────────►  SyncError::Timeout              │
//! │       ├── connect/DNS failure ──────►  SyncError::ConnectionFailed     │
//! │       ├── non-2xx status ───────────►  SyncError::HttpStatus           │
//! │       ├── body not an envelope ─────►  SyncError::InvalidEnvelope      │
//! │       └── valid envelope ───────────►  Ok(ScriptResponse)              │
//! │                                                                         │
//! │  The gateway never substitutes fallback data: provenance decisions     │
//! │  belong to the facade one layer up.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stateless between calls; no retry, no backoff anywhere in the layer.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{SyncError, SyncResult};
use crate::protocol::{Action, ScriptRequest, ScriptResponse};

// =============================================================================
// Transport Seam
// =============================================================================

/// The one seam between the facade and the network.
///
/// Production uses [`HttpGateway`]; tests drive the facade with a stub that
/// fails or answers on demand.
#[async_trait]
pub trait ScriptTransport: Send + Sync {
    /// Performs one action call against the endpoint.
    async fn send(&self, action: Action, payload: Value) -> SyncResult<ScriptResponse>;
}

// =============================================================================
// HTTP Gateway
// =============================================================================

/// HTTP implementation of [`ScriptTransport`].
pub struct HttpGateway {
    client: reqwest::Client,
    url: String,
    timeout_secs: u64,
}

impl HttpGateway {
    /// Builds a gateway from the client configuration.
    pub fn new(config: &ClientConfig) -> SyncResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| SyncError::InvalidConfig(format!("HTTP client init failed: {}", e)))?;

        Ok(HttpGateway {
            client,
            url: config.script_url().to_string(),
            timeout_secs: config.endpoint.request_timeout_secs,
        })
    }

    /// Maps a reqwest failure onto the transport taxonomy.
    fn classify(&self, err: reqwest::Error) -> SyncError {
        if err.is_timeout() {
            SyncError::Timeout(self.timeout_secs)
        } else {
            SyncError::ConnectionFailed(err.to_string())
        }
    }
}

#[async_trait]
impl ScriptTransport for HttpGateway {
    async fn send(&self, action: Action, payload: Value) -> SyncResult<ScriptResponse> {
        let request = ScriptRequest::new(action, payload);

        debug!(action = %action, url = %self.url, "Sending script request");

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(action = %action, status = status.as_u16(), "Endpoint returned error status");
            return Err(SyncError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;

        let envelope: ScriptResponse = serde_json::from_str(&body)
            .map_err(|e| SyncError::InvalidEnvelope(e.to_string()))?;

        debug!(action = %action, success = envelope.success, "Script response received");
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_builds_from_config() {
        let config = ClientConfig::default();
        let gateway = HttpGateway::new(&config).unwrap();
        assert_eq!(gateway.url, config.script_url());
        assert_eq!(gateway.timeout_secs, 30);
    }

    // Network behavior is exercised through the facade with a stub
    // transport; see service.rs tests.
}
