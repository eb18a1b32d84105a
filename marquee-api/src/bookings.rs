use axum::{
    extract::{Json, State},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReserveRequest {
    pub show_id: Uuid,
    /// Identity verification happens upstream; the engine takes the caller's
    /// id as given.
    pub user_id: String,
    pub seat_labels: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ReserveResponse {
    booking_id: Uuid,
    booked_seats: Vec<String>,
    amount: i64,
    payment_link: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/bookings", post(reserve))
}

/// Claim seats and open a pending booking; responds with the payment link
/// the customer must complete before the release window elapses.
async fn reserve(
    State(state): State<AppState>,
    Json(req): Json<ReserveRequest>,
) -> Result<Json<ReserveResponse>, AppError> {
    let booking = state
        .coordinator
        .reserve(req.show_id, &req.user_id, req.seat_labels)
        .await?;

    Ok(Json(ReserveResponse {
        booking_id: booking.id,
        booked_seats: booking.booked_seats,
        amount: booking.amount,
        payment_link: booking.payment_link,
    }))
}
