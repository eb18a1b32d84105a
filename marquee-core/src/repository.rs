use async_trait::async_trait;
use chrono::{DateTime, Utc};
use marquee_domain::{Booking, MarqueeError, Movie, PaidTransition, Show};
use uuid::Uuid;

/// Repository trait for movie catalog access.
#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn find_by_external_id(&self, external_id: i64) -> Result<Option<Movie>, MarqueeError>;

    /// Insert `movie` unless a record with the same external id already
    /// exists, in one atomic step, and return the persisted record. Two
    /// concurrent first-time inserts for one external id must converge on a
    /// single record.
    async fn upsert_by_external_id(&self, movie: Movie) -> Result<Movie, MarqueeError>;

    async fn get(&self, id: Uuid) -> Result<Option<Movie>, MarqueeError>;
}

/// Repository trait for show and seat-occupancy access.
///
/// The show record is the single serialization point for seat state: both
/// mutating operations are atomic conditional updates, never a read followed
/// by a separate write.
#[async_trait]
pub trait ShowRepository: Send + Sync {
    /// All-or-nothing batch insert.
    async fn insert_batch(&self, shows: Vec<Show>) -> Result<(), MarqueeError>;

    async fn get(&self, id: Uuid) -> Result<Option<Show>, MarqueeError>;

    /// Shows with `show_datetime >= now`, ascending by time.
    async fn list_upcoming(&self, now: DateTime<Utc>) -> Result<Vec<Show>, MarqueeError>;

    async fn list_upcoming_for_movie(
        &self,
        movie_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Show>, MarqueeError>;

    /// Atomic claim-if-all-unclaimed. Exactly one of two racing overlapping
    /// claims wins; the loser gets `SeatUnavailable` with the conflicting
    /// labels and the show is left unmodified.
    async fn claim_seats(
        &self,
        show_id: Uuid,
        user_id: &str,
        seats: &[String],
    ) -> Result<(), MarqueeError>;

    /// Remove `seats` where they still map to `user_id`. A missing show is a
    /// no-op: the compensation path must stay harmless on repeats.
    async fn release_seats(
        &self,
        show_id: Uuid,
        user_id: &str,
        seats: &[String],
    ) -> Result<(), MarqueeError>;
}

/// Repository trait for the booking ledger.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: Booking) -> Result<(), MarqueeError>;

    async fn get(&self, id: Uuid) -> Result<Option<Booking>, MarqueeError>;

    /// Store the hosted-checkout link on a pending booking. No-op on a paid
    /// booking: confirmation clears the link, and a confirmation racing the
    /// tail of `reserve` must not see it re-written.
    async fn set_payment_link(&self, id: Uuid, link: &str) -> Result<(), MarqueeError>;

    /// Atomic unpaid -> paid transition; clears the payment link. Returns
    /// which side of the transition was observed so callers can notify
    /// exactly once.
    async fn mark_paid(&self, id: Uuid) -> Result<PaidTransition, MarqueeError>;

    /// Remove and return the booking only if it is still unpaid; `None` when
    /// missing or already paid. Linearized against `mark_paid` on the same
    /// record.
    async fn remove_if_unpaid(&self, id: Uuid) -> Result<Option<Booking>, MarqueeError>;

    /// Unconditional delete, used when rolling back a freshly created
    /// booking after a failed payment-session request.
    async fn delete(&self, id: Uuid) -> Result<(), MarqueeError>;
}
