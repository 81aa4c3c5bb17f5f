//! # Sync Error Types
//!
//! Error types for the data-sync layer.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sync Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Transport     │  │    Protocol     │  │       Domain            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Connection     │  │  InvalidEnvelope│  │  Remote                 │ │
//! │  │  Timeout        │  │  UnexpectedData │  │  (success:false with    │ │
//! │  │  HttpStatus     │  │                 │  │   server message)       │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────────────┐                      │
//! │  │  Configuration  │  │       Session           │                      │
//! │  │                 │  │                         │                      │
//! │  │  InvalidConfig  │  │  Storage                │                      │
//! │  │  InvalidUrl     │  │  (durable user state)   │                      │
//! │  └─────────────────┘  └─────────────────────────┘                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transport and protocol failures never reach a read caller: the facade
//! substitutes the fallback dataset for them. Domain failures pass through
//! unchanged so the user sees the server's own message.

use thiserror::Error;

/// Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Sync error type covering all failures of the data-sync layer.
#[derive(Debug, Error)]
pub enum SyncError {
    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Network unreachable, DNS failure, or the connection dropped mid-call.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Client-side request timeout.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Endpoint answered with a non-2xx status.
    #[error("Endpoint returned HTTP {0}")]
    HttpStatus(u16),

    // =========================================================================
    // Protocol Errors
    // =========================================================================
    /// Response body was not a valid `{success, data, error}` envelope.
    #[error("Invalid response envelope: {0}")]
    InvalidEnvelope(String),

    /// Envelope was well-formed but its payload did not match the action.
    #[error("Unexpected payload for {action}: {reason}")]
    UnexpectedPayload { action: String, reason: String },

    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// The endpoint processed the request and rejected it; carries the
    /// server's own message, surfaced to the user verbatim.
    #[error("{0}")]
    Remote(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid endpoint URL.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Session Errors
    // =========================================================================
    /// Durable session storage could not be read or written.
    #[error("Session storage error: {0}")]
    SessionStorage(String),

    // =========================================================================
    // Internal Errors
    // =========================================================================
    /// Failed to serialize an outgoing payload.
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::SerializationFailed(err.to_string())
    }
}

impl From<url::ParseError> for SyncError {
    fn from(err: url::ParseError) -> Self {
        SyncError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for SyncError {
    fn from(err: toml::ser::Error) -> Self {
        SyncError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization (fallback substitution policy)
// =============================================================================

impl SyncError {
    /// Returns true for failures at or below the network layer.
    ///
    /// These never reach a read caller: the facade substitutes the
    /// fallback dataset for the affected action.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            SyncError::ConnectionFailed(_) | SyncError::Timeout(_) | SyncError::HttpStatus(_)
        )
    }

    /// Returns true when the endpoint answered but not with a valid envelope.
    ///
    /// Treated exactly like a transport failure by the fallback policy.
    pub fn is_protocol_error(&self) -> bool {
        matches!(
            self,
            SyncError::InvalidEnvelope(_) | SyncError::UnexpectedPayload { .. }
        )
    }

    /// Returns true when the failure is eligible for fallback substitution.
    pub fn is_substitutable(&self) -> bool {
        self.is_transport_error() || self.is_protocol_error()
    }

    /// Returns true for a server-side rejection with a user-facing message.
    pub fn is_domain_error(&self) -> bool {
        matches!(self, SyncError::Remote(_))
    }
}
