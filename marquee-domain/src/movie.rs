use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
    pub profile_path: Option<String>,
}

/// Cached metadata for one movie, keyed by the external catalog id.
///
/// Created once per `external_id` via find-or-create and never re-synced
/// afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: Uuid,
    pub external_id: i64,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub genres: Vec<Genre>,
    pub casts: Vec<CastMember>,
    pub release_date: Option<String>,
    pub original_language: String,
    pub tagline: String,
    pub vote_average: f64,
    pub runtime: i64,
    pub created_at: DateTime<Utc>,
}
