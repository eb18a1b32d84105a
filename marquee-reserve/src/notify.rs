use async_trait::async_trait;
use marquee_core::Notifier;
use marquee_domain::{Booking, MarqueeError};

/// Default notifier: records the confirmation in the log stream.
///
/// Message delivery (mail, push) hangs off this seam; content is out of the
/// engine's scope.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn booking_paid(&self, booking: &Booking) -> Result<(), MarqueeError> {
        tracing::info!(
            booking_id = %booking.id,
            user_id = %booking.user_id,
            seats = ?booking.booked_seats,
            amount = booking.amount,
            "booking confirmed, notifying user"
        );
        Ok(())
    }
}
