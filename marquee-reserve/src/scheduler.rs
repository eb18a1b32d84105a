use std::time::Duration;

use async_trait::async_trait;
use marquee_core::DelayedScheduler;
use tokio::sync::mpsc;
use uuid::Uuid;

/// In-process delayed scheduler.
///
/// Each `schedule` call spawns a sleep that, on expiry, pushes the booking id
/// onto a queue drained by the release worker. Delivery is at-least-once
/// from the consumer's point of view; the release check itself is the
/// idempotency barrier.
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<Uuid>,
}

impl TokioScheduler {
    /// Returns the scheduler and the receiving end for the release worker.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Uuid>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl DelayedScheduler for TokioScheduler {
    async fn schedule(&self, delay: Duration, booking_id: Uuid) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means shutdown; nothing left to release into
            if tx.send(booking_id).is_err() {
                tracing::warn!(%booking_id, "release queue closed, dropping check");
            }
        });
        tracing::debug!(%booking_id, delay_secs = delay.as_secs(), "release check scheduled");
    }
}
