use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use marquee_catalog::{MovieAvailability, UpcomingShow};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/shows", get(list_shows))
        .route("/v1/shows/{movie_id}", get(movie_availability))
}

/// All upcoming shows joined with their movie, soonest first.
async fn list_shows(State(state): State<AppState>) -> Result<Json<Vec<UpcomingShow>>, AppError> {
    Ok(Json(state.shows.list_upcoming().await?))
}

/// One movie plus its upcoming shows grouped by calendar date.
async fn movie_availability(
    State(state): State<AppState>,
    Path(movie_id): Path<Uuid>,
) -> Result<Json<MovieAvailability>, AppError> {
    Ok(Json(state.shows.availability(movie_id).await?))
}
