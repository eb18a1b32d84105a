use thiserror::Error;

/// Error taxonomy shared across the engine.
///
/// Reservation-path errors are synchronous and leave no partial state; the
/// API layer maps each variant onto an HTTP status.
#[derive(Debug, Error)]
pub enum MarqueeError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Seats not available: {}", .0.join(", "))]
    SeatUnavailable(Vec<String>),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Payment session creation failed: {0}")]
    PaymentInit(String),
}

impl MarqueeError {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}
