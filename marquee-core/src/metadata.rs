use async_trait::async_trait;
use marquee_domain::{CastMember, Genre, MarqueeError};
use serde::{Deserialize, Serialize};

/// Raw metadata for one movie as returned by the external catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub release_date: Option<String>,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub runtime: i64,
}

/// External movie-metadata source (TMDB-shaped).
///
/// Details and credits are two independent calls; failures surface as
/// [`MarqueeError::Provider`] and are non-fatal to the rest of the system.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn details(&self, external_id: i64) -> Result<MovieDetails, MarqueeError>;

    async fn credits(&self, external_id: i64) -> Result<Vec<CastMember>, MarqueeError>;
}
