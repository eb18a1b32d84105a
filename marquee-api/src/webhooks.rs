use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use chrono::Utc;
use marquee_core::signature::{verify_signature, SIGNATURE_HEADER};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GatewayEvent {
    #[serde(rename = "type")]
    pub type_: String,
    pub data: EventData,
}

#[derive(Debug, Deserialize)]
pub struct EventData {
    pub object: SessionObject,
}

#[derive(Debug, Deserialize)]
pub struct SessionObject {
    pub id: String,
    #[serde(default)]
    pub metadata: Option<SessionMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct SessionMetadata {
    #[serde(rename = "bookingId")]
    pub booking_id: Option<Uuid>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/webhooks/payments", post(handle_payment_webhook))
}

/// POST /v1/webhooks/payments
///
/// The signature covers the raw body, so verification runs before any JSON
/// parsing. After verification, only `checkout.session.completed` matters;
/// everything else is acknowledged and ignored, payment failures included,
/// since the timeout path owns seat reclamation.
async fn handle_payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let header = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::BAD_REQUEST)?;

    if let Err(err) = verify_signature(
        &state.webhook.secret,
        header,
        &body,
        state.webhook.tolerance_secs,
        Utc::now(),
    ) {
        tracing::warn!(error = %err, "webhook signature rejected");
        return Err(StatusCode::BAD_REQUEST);
    }

    let event: GatewayEvent =
        serde_json::from_slice(&body).map_err(|_| StatusCode::BAD_REQUEST)?;

    if event.type_ == "checkout.session.completed" {
        let booking_id = event.data.object.metadata.and_then(|m| m.booking_id);
        let Some(booking_id) = booking_id else {
            tracing::warn!(session = %event.data.object.id, "completed session without booking metadata");
            return Ok(Json(json!({ "received": true })));
        };

        state
            .coordinator
            .confirm_payment(booking_id)
            .await
            .map_err(|err| {
                tracing::error!(%booking_id, error = %err, "webhook processing failed");
                StatusCode::INTERNAL_SERVER_ERROR
            })?;
    } else {
        tracing::debug!(event_type = %event.type_, "ignoring webhook event");
    }

    Ok(Json(json!({ "received": true })))
}
