//! Error types for Courtside

use thiserror::Error;

/// Core errors that can occur in Courtside
#[derive(Debug, Error)]
pub enum Error {
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Payment validation errors
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Insufficient tokens: need {required}, have {available}")]
    InsufficientTokens { required: i64, available: i64 },

    #[error("Token selection {requested} exceeds limit {limit}")]
    Overspend { requested: i64, limit: i64 },
}

/// Errors from the remote backend collaborator
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend unreachable: {reason}")]
    Unreachable { reason: String },

    #[error("Backend returned error: {message}")]
    ApiError { message: String },

    #[error("Request rejected: {reason}")]
    Rejected { reason: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl BackendError {
    /// True when the failure carries a server-supplied business reason
    /// rather than a transport problem.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Contract-misuse errors from the confirmation flow.
///
/// Backend failures never appear here; the flow turns those into states.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Cannot confirm from state '{state}'")]
    NotConfirmable { state: &'static str },

    #[error("Breakdown is not valid for submission")]
    InvalidBreakdown,

    #[error("A confirmation is already in flight")]
    AlreadyInFlight,
}

/// Result type alias for Courtside operations
pub type Result<T> = std::result::Result<T, Error>;

impl PaymentError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientTokens { .. } => "insufficient_tokens",
            Self::Overspend { .. } => "overspend",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InsufficientTokens { .. } | Self::Overspend { .. } => 422,
        }
    }
}
