use async_trait::async_trait;
use marquee_domain::MarqueeError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    /// Correlation metadata; the gateway echoes this back in its webhook.
    pub booking_id: Uuid,
    /// Amount in minor currency units.
    pub amount: i64,
    pub currency: String,
    pub success_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub session_id: String,
    /// Hosted payment page the customer is redirected to.
    pub payment_link: String,
}

/// Abstraction over a hosted-checkout payment provider (Stripe et al.).
///
/// Session creation is the only synchronous call; confirmation arrives later
/// through a signed webhook handled by the API layer. Callers own retry and
/// backoff; nothing here retries in a way that could double-create a
/// session.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_session(
        &self,
        req: &CreateSessionRequest,
    ) -> Result<CheckoutSession, MarqueeError>;
}
