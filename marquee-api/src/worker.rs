use std::sync::Arc;

use marquee_reserve::ReservationCoordinator;
use tokio::sync::mpsc;
use tracing::{error, info};
use uuid::Uuid;

/// Drains the delayed-release queue and runs the compensation check.
///
/// Failures are logged and the loop keeps going: the check is idempotent, so
/// a later duplicate delivery can finish what a failed attempt started.
pub async fn run_release_worker(
    mut rx: mpsc::UnboundedReceiver<Uuid>,
    coordinator: Arc<ReservationCoordinator>,
) {
    info!("Release worker started");

    while let Some(booking_id) = rx.recv().await {
        if let Err(err) = coordinator.release_if_unpaid(booking_id).await {
            error!(%booking_id, error = %err, "release check failed");
        }
    }

    info!("Release worker shutting down");
}
