use async_trait::async_trait;
use marquee_domain::{Booking, MarqueeError};

/// Post-confirmation message hook.
///
/// Fired exactly once per booking, on the unpaid -> paid transition.
/// Message content is outside the engine's scope.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn booking_paid(&self, booking: &Booking) -> Result<(), MarqueeError>;
}
