use std::sync::Arc;
use std::time::Duration;

use marquee_core::{
    BookingRepository, CreateSessionRequest, DelayedScheduler, Notifier, PaymentGateway,
    ShowRepository,
};
use marquee_domain::{seat_label_is_valid, Booking, MarqueeError, PaidTransition};
use uuid::Uuid;

/// Policy knobs for the reservation saga, sourced from configuration.
#[derive(Debug, Clone)]
pub struct ReservationPolicy {
    pub max_seats_per_booking: usize,
    /// How long an unpaid booking may hold seats before compensation.
    pub payment_window: Duration,
    pub currency: String,
    pub success_url: String,
    pub cancel_url: String,
}

/// Orchestrates the reserve -> pay -> confirm/compensate saga.
///
/// Per booking the state machine is `PENDING -> PAID` or `PENDING ->
/// RELEASED` (record deleted); both terminal transitions are idempotent
/// because the gateway retries its webhook and the scheduler delivers
/// at-least-once. Occupancy maps are mutated only here.
pub struct ReservationCoordinator {
    shows: Arc<dyn ShowRepository>,
    bookings: Arc<dyn BookingRepository>,
    gateway: Arc<dyn PaymentGateway>,
    scheduler: Arc<dyn DelayedScheduler>,
    notifier: Arc<dyn Notifier>,
    policy: ReservationPolicy,
}

impl ReservationCoordinator {
    pub fn new(
        shows: Arc<dyn ShowRepository>,
        bookings: Arc<dyn BookingRepository>,
        gateway: Arc<dyn PaymentGateway>,
        scheduler: Arc<dyn DelayedScheduler>,
        notifier: Arc<dyn Notifier>,
        policy: ReservationPolicy,
    ) -> Self {
        Self {
            shows,
            bookings,
            gateway,
            scheduler,
            notifier,
            policy,
        }
    }

    /// Claim seats and open a pending booking with a payment link.
    ///
    /// The seat claim is atomic claim-if-all-unclaimed on the show; booking
    /// creation follows under the same logical unit. If the gateway then
    /// refuses a session, both are rolled back so no orphaned hold survives.
    pub async fn reserve(
        &self,
        show_id: Uuid,
        user_id: &str,
        seat_labels: Vec<String>,
    ) -> Result<Booking, MarqueeError> {
        self.validate_seat_request(&seat_labels)?;

        let show = self
            .shows
            .get(show_id)
            .await?
            .ok_or_else(|| MarqueeError::not_found("Show", show_id))?;
        let amount = show.price * seat_labels.len() as i64;

        self.shows
            .claim_seats(show_id, user_id, &seat_labels)
            .await?;

        let mut booking = Booking::new(show_id, user_id, seat_labels, amount);
        self.bookings.insert(booking.clone()).await?;

        let session = match self
            .gateway
            .create_session(&CreateSessionRequest {
                booking_id: booking.id,
                amount,
                currency: self.policy.currency.clone(),
                success_url: self.policy.success_url.clone(),
                cancel_url: self.policy.cancel_url.clone(),
            })
            .await
        {
            Ok(session) => session,
            Err(err) => {
                // Unwind the claim and the booking before surfacing
                self.shows
                    .release_seats(show_id, user_id, &booking.booked_seats)
                    .await?;
                self.bookings.delete(booking.id).await?;
                tracing::warn!(booking_id = %booking.id, error = %err, "payment session failed, reservation rolled back");
                return Err(MarqueeError::PaymentInit(err.to_string()));
            }
        };

        self.bookings
            .set_payment_link(booking.id, &session.payment_link)
            .await?;
        booking.payment_link = session.payment_link;

        self.scheduler
            .schedule(self.policy.payment_window, booking.id)
            .await;

        tracing::info!(
            booking_id = %booking.id,
            %show_id,
            user_id,
            seats = ?booking.booked_seats,
            amount,
            "reservation pending payment"
        );
        Ok(booking)
    }

    /// Gateway callback: flip the booking to paid.
    ///
    /// Idempotent: a missing or already-paid booking is a successful no-op,
    /// and the notifier fires only on the actual transition, so webhook
    /// retries never send a second message.
    pub async fn confirm_payment(&self, booking_id: Uuid) -> Result<(), MarqueeError> {
        match self.bookings.mark_paid(booking_id).await? {
            PaidTransition::Confirmed(booking) => {
                tracing::info!(%booking_id, "booking marked as paid");
                if let Err(err) = self.notifier.booking_paid(&booking).await {
                    // The payment stands regardless of notification delivery
                    tracing::error!(%booking_id, error = %err, "notifier failed");
                }
            }
            PaidTransition::AlreadyPaid => {
                tracing::debug!(%booking_id, "duplicate payment confirmation ignored");
            }
            PaidTransition::Missing => {
                tracing::debug!(%booking_id, "payment confirmation for unknown booking ignored");
            }
        }
        Ok(())
    }

    /// Delayed compensation: reclaim seats from a booking that never paid.
    ///
    /// The unpaid booking is taken out of the ledger in one conditional
    /// step, which settles the race against a late webhook; seats are then
    /// freed only where they still belong to this booking's user. Safe to
    /// fire any number of times.
    pub async fn release_if_unpaid(&self, booking_id: Uuid) -> Result<(), MarqueeError> {
        let Some(booking) = self.bookings.remove_if_unpaid(booking_id).await? else {
            tracing::debug!(%booking_id, "release check: booking paid or already gone");
            return Ok(());
        };

        self.shows
            .release_seats(booking.show_id, &booking.user_id, &booking.booked_seats)
            .await?;

        tracing::info!(
            %booking_id,
            show_id = %booking.show_id,
            seats = ?booking.booked_seats,
            "unpaid booking released"
        );
        Ok(())
    }

    fn validate_seat_request(&self, seat_labels: &[String]) -> Result<(), MarqueeError> {
        if seat_labels.is_empty() {
            return Err(MarqueeError::Validation(
                "at least one seat must be selected".to_string(),
            ));
        }
        if seat_labels.len() > self.policy.max_seats_per_booking {
            return Err(MarqueeError::Validation(format!(
                "at most {} seats per booking",
                self.policy.max_seats_per_booking
            )));
        }
        for (i, label) in seat_labels.iter().enumerate() {
            if !seat_label_is_valid(label) {
                return Err(MarqueeError::Validation(format!(
                    "invalid seat label: {label}"
                )));
            }
            if seat_labels[..i].contains(label) {
                return Err(MarqueeError::Validation(format!(
                    "duplicate seat label: {label}"
                )));
            }
        }
        Ok(())
    }
}
