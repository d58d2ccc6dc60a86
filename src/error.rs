use thiserror::Error;

use crate::gateway::GatewayError;

/// Everything that can terminate an order request. None of these are retried.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("missing required fields")]
    MissingFields,

    #[error("invalid WhatsApp number")]
    InvalidPhone,

    #[error("similar order placed within the dedup window")]
    DuplicateOrder,

    #[error("database error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("notification error: {0}")]
    Notify(#[from] GatewayError),

    #[error("request timed out")]
    Timeout,
}

impl OrderError {
    /// Caused by the submitted payload (HTTP 400) rather than by us (HTTP 500).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            OrderError::MissingFields | OrderError::InvalidPhone | OrderError::DuplicateOrder
        )
    }

    /// The message the client sees. Server-side detail goes to the log instead.
    pub fn client_message(&self) -> &'static str {
        match self {
            OrderError::MissingFields => "All fields are required.",
            OrderError::InvalidPhone => "Please enter a valid 10-digit Indian mobile number.",
            OrderError::DuplicateOrder => "Similar order was placed recently. Please wait a moment.",
            _ => "Error placing order. Please try again.",
        }
    }
}
