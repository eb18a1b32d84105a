use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use marquee_core::MovieRepository;
use marquee_domain::{MarqueeError, Movie};
use uuid::Uuid;

/// In-memory movie store keyed by external catalog id.
///
/// The external id is the uniqueness boundary: `upsert_by_external_id` goes
/// through the dashmap entry API, so two concurrent first-time lookups can
/// never persist two records for one id: the loser adopts the winner's.
pub struct InMemoryMovieRepo {
    by_external: DashMap<i64, Movie>,
}

impl InMemoryMovieRepo {
    pub fn new() -> Self {
        Self {
            by_external: DashMap::new(),
        }
    }
}

impl Default for InMemoryMovieRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepo {
    async fn find_by_external_id(&self, external_id: i64) -> Result<Option<Movie>, MarqueeError> {
        Ok(self.by_external.get(&external_id).map(|m| m.clone()))
    }

    async fn upsert_by_external_id(&self, movie: Movie) -> Result<Movie, MarqueeError> {
        match self.by_external.entry(movie.external_id) {
            Entry::Occupied(existing) => Ok(existing.get().clone()),
            Entry::Vacant(slot) => {
                slot.insert(movie.clone());
                Ok(movie)
            }
        }
    }

    async fn get(&self, id: Uuid) -> Result<Option<Movie>, MarqueeError> {
        Ok(self
            .by_external
            .iter()
            .find(|entry| entry.value().id == id)
            .map(|entry| entry.value().clone()))
    }
}
