use axum::{
    extract::{Json, State},
    routing::post,
    Router,
};
use marquee_catalog::ScheduleEntry;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddShowsRequest {
    /// External catalog id of the movie (TMDB id).
    pub movie_id: i64,
    /// Per-seat price in minor currency units.
    pub show_price: i64,
    pub shows: Vec<ScheduleEntry>,
}

#[derive(Debug, Serialize)]
struct AddShowsResponse {
    movie_id: Uuid,
    created: usize,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/admin/shows", post(add_shows))
}

/// Find-or-create the movie from the external catalog, then batch-create
/// its shows. The batch is all-or-nothing: one bad date/time and nothing
/// is written.
async fn add_shows(
    State(state): State<AppState>,
    Json(req): Json<AddShowsRequest>,
) -> Result<Json<AddShowsResponse>, AppError> {
    let movie = state.movies.get_or_create(req.movie_id).await?;
    let created = state
        .shows
        .create_shows(movie.id, req.show_price, &req.shows)
        .await?;

    Ok(Json(AddShowsResponse {
        movie_id: movie.id,
        created: created.len(),
    }))
}
