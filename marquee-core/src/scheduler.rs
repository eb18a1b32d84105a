use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

/// At-least-once delayed invocation of the release check.
///
/// Scheduled at claim time; the check itself short-circuits on paid or
/// missing bookings, so duplicate firings are harmless and nothing ever
/// needs to be cancelled.
#[async_trait]
pub trait DelayedScheduler: Send + Sync {
    async fn schedule(&self, delay: Duration, booking_id: Uuid);
}
