use async_trait::async_trait;
use marquee_core::{CheckoutSession, CreateSessionRequest, PaymentGateway};
use marquee_domain::MarqueeError;

/// Stand-in gateway for development and tests.
///
/// Sessions encode the booking id so the hosted page and webhook can
/// correlate them. The failing variant exercises the rollback path.
pub struct MockPaymentGateway {
    fail: bool,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self { fail: false }
    }

    /// A gateway whose session creation always fails.
    pub fn failing() -> Self {
        Self { fail: true }
    }
}

impl Default for MockPaymentGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_session(
        &self,
        req: &CreateSessionRequest,
    ) -> Result<CheckoutSession, MarqueeError> {
        if self.fail {
            return Err(MarqueeError::PaymentInit(
                "simulated gateway outage".to_string(),
            ));
        }

        let session_id = format!("cs_mock_{}", req.booking_id.simple());
        tracing::info!(
            booking_id = %req.booking_id,
            amount = req.amount,
            currency = %req.currency,
            "mock checkout session created"
        );

        Ok(CheckoutSession {
            payment_link: format!("https://pay.example/checkout/{session_id}"),
            session_id,
        })
    }
}
