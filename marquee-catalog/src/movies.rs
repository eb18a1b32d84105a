use std::sync::Arc;

use chrono::Utc;
use marquee_core::{MetadataProvider, MovieRepository};
use marquee_domain::{MarqueeError, Movie};
use uuid::Uuid;

/// Find-or-create cache of movie metadata keyed by external catalog id.
///
/// Metadata is fetched once per external id and never re-synced. The
/// persistence step is an atomic upsert, so duplicate fetches triggered by a
/// race still converge on one record.
pub struct MovieCatalog {
    movies: Arc<dyn MovieRepository>,
    provider: Arc<dyn MetadataProvider>,
}

impl MovieCatalog {
    pub fn new(movies: Arc<dyn MovieRepository>, provider: Arc<dyn MetadataProvider>) -> Self {
        Self { movies, provider }
    }

    pub async fn get_or_create(&self, external_id: i64) -> Result<Movie, MarqueeError> {
        if let Some(movie) = self.movies.find_by_external_id(external_id).await? {
            return Ok(movie);
        }

        // Details and credits are independent calls; issue them together
        let (details, casts) = tokio::join!(
            self.provider.details(external_id),
            self.provider.credits(external_id)
        );
        let details = details?;
        let casts = casts?;

        let movie = Movie {
            id: Uuid::new_v4(),
            external_id,
            title: details.title,
            overview: details.overview,
            poster_path: details.poster_path,
            backdrop_path: details.backdrop_path,
            genres: details.genres,
            casts,
            release_date: details.release_date,
            original_language: details.original_language,
            tagline: details.tagline.unwrap_or_default(),
            vote_average: details.vote_average,
            runtime: details.runtime,
            created_at: Utc::now(),
        };

        let persisted = self.movies.upsert_by_external_id(movie).await?;
        tracing::info!(external_id, movie_id = %persisted.id, "movie cached");
        Ok(persisted)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Movie>, MarqueeError> {
        self.movies.get(id).await
    }
}
