//! Unified error handling for ccctl-core
//!
//! Every client operation returns [`CoreError`] so callers can branch on the
//! failure class without string matching.
//!
//! # Example
//!
//! ```rust
//! use ccctl_core::CoreError;
//!
//! fn handle_error(err: CoreError) {
//!     if err.is_not_found() {
//!         println!("Resource not found");
//!     } else if err.is_unauthorized() {
//!         println!("Log in again");
//!     }
//! }
//!
//! let err = CoreError::ClusterExists { name: "demo".to_string() };
//! assert!(err.is_conflict());
//! ```

use thiserror::Error;

/// Core error type for all Camunda Cloud operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// Network, DNS or TLS failure before any response was received
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// An authorized operation was attempted before a successful login
    #[error("Not authenticated: call login before using the API")]
    NotAuthenticated,

    /// The token endpoint rejected the client credentials
    #[error("HTTP Error trying to login: {status}")]
    AuthenticationFailed { status: u16 },

    /// The management API rejected the bearer token (401/403)
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Any other non-success HTTP status
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The requested resource does not exist
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// The response body was not the expected JSON
    #[error("Failed to decode {context}: {message}")]
    Decode { context: String, message: String },

    /// Input rejected before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// A cluster with the requested name already exists
    #[error("Cluster name '{name}' already exists on Camunda Cloud")]
    ClusterExists { name: String },

    /// Client construction or configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Returns true if this is a "not found" error (404)
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::NotFound { .. } | CoreError::Api { status: 404, .. }
        )
    }

    /// Returns true if this is an authentication/authorization error
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            CoreError::NotAuthenticated
                | CoreError::AuthenticationFailed { .. }
                | CoreError::Unauthorized { .. }
        )
    }

    /// Returns true if the input was rejected client-side
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }

    /// Returns true if this is a conflict (duplicate name or HTTP 409)
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            CoreError::ClusterExists { .. } | CoreError::Api { status: 409, .. }
        )
    }

    /// Returns true if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, CoreError::Api { status, .. } if (500..600).contains(status))
    }

    /// HTTP status carried by this error, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            CoreError::AuthenticationFailed { status } | CoreError::Api { status, .. } => {
                Some(*status)
            }
            CoreError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
