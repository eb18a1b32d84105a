use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use marquee_domain::MarqueeError;
use serde_json::json;

/// HTTP projection of the engine's error taxonomy.
#[derive(Debug)]
pub enum AppError {
    Engine(MarqueeError),
    Internal(anyhow::Error),
}

impl From<MarqueeError> for AppError {
    fn from(err: MarqueeError) -> Self {
        Self::Engine(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Engine(err) => {
                let status = match &err {
                    MarqueeError::Validation(_) => StatusCode::BAD_REQUEST,
                    MarqueeError::SeatUnavailable(_) => StatusCode::CONFLICT,
                    MarqueeError::NotFound { .. } => StatusCode::NOT_FOUND,
                    MarqueeError::Provider(_) | MarqueeError::PaymentInit(_) => {
                        StatusCode::BAD_GATEWAY
                    }
                };
                (status, err.to_string())
            }
            AppError::Internal(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
