//! Centralized error handling with typed error enums.
//!
//! The engine distinguishes three client-relevant conditions:
//! - `BadRequest`: invalid or missing input (empty required query,
//!   out-of-range limit)
//! - `NotFound`: the existence filter rejected the requested product id
//! - `Internal`: an invariant violation or other unexpected fault; logged
//!   with context and surfaced as an opaque failure

use thiserror::Error;

/// A specialized Result type for catalog-search operations.
///
/// This is an alias for `anyhow::Result`, used by the binary setup path and
/// anywhere context is attached with `.context()`.
pub type Result<T> = anyhow::Result<T>;

/// Primary error type for engine operations.
///
/// `BadRequest` and `NotFound` are client-visible and carry a message safe to
/// echo back. `Internal` is logged in full and surfaced opaquely.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid or missing request parameter.
    #[error("{message}")]
    BadRequest { message: String },

    /// The requested product id is not known to the engine.
    #[error("Product not found: {product_id}")]
    NotFound { product_id: String },

    /// Internal/unexpected errors (invariant violations, etc.)
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },
}

impl EngineError {
    /// Create a bad-request error from a message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create a not-found error for a product id.
    pub fn not_found(product_id: impl Into<String>) -> Self {
        Self::NotFound {
            product_id: product_id.into(),
        }
    }

    /// Create an internal error from a message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error with a source cause.
    pub fn internal_with_source(message: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Whether this error may be echoed to the client verbatim.
    pub fn is_client_visible(&self) -> bool {
        !matches!(self, Self::Internal { .. })
    }
}
