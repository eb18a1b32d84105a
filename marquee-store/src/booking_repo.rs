use async_trait::async_trait;
use dashmap::DashMap;
use marquee_core::BookingRepository;
use marquee_domain::{Booking, MarqueeError, PaidTransition};
use uuid::Uuid;

/// In-memory booking ledger.
///
/// `mark_paid` and `remove_if_unpaid` both resolve under the entry's
/// exclusive reference, which linearizes the paid/released race for a single
/// booking: whichever lands first decides, the other becomes a no-op.
pub struct InMemoryBookingRepo {
    bookings: DashMap<Uuid, Booking>,
}

impl InMemoryBookingRepo {
    pub fn new() -> Self {
        Self {
            bookings: DashMap::new(),
        }
    }
}

impl Default for InMemoryBookingRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepo {
    async fn insert(&self, booking: Booking) -> Result<(), MarqueeError> {
        self.bookings.insert(booking.id, booking);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Booking>, MarqueeError> {
        Ok(self.bookings.get(&id).map(|b| b.clone()))
    }

    async fn set_payment_link(&self, id: Uuid, link: &str) -> Result<(), MarqueeError> {
        let mut booking = self
            .bookings
            .get_mut(&id)
            .ok_or_else(|| MarqueeError::not_found("Booking", id))?;
        // A webhook that beat us here already cleared the link; keep it so
        if booking.is_paid {
            return Ok(());
        }
        booking.payment_link = link.to_string();
        Ok(())
    }

    async fn mark_paid(&self, id: Uuid) -> Result<PaidTransition, MarqueeError> {
        let Some(mut booking) = self.bookings.get_mut(&id) else {
            return Ok(PaidTransition::Missing);
        };
        if booking.is_paid {
            return Ok(PaidTransition::AlreadyPaid);
        }
        booking.is_paid = true;
        booking.payment_link.clear();
        Ok(PaidTransition::Confirmed(booking.clone()))
    }

    async fn remove_if_unpaid(&self, id: Uuid) -> Result<Option<Booking>, MarqueeError> {
        Ok(self
            .bookings
            .remove_if(&id, |_, booking| !booking.is_paid)
            .map(|(_, booking)| booking))
    }

    async fn delete(&self, id: Uuid) -> Result<(), MarqueeError> {
        self.bookings.remove(&id);
        Ok(())
    }
}
