use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use marquee_core::ShowRepository;
use marquee_domain::{MarqueeError, Show};
use uuid::Uuid;

/// In-memory show store.
///
/// `claim_seats` and `release_seats` run under the dashmap entry's exclusive
/// reference, so the check-unoccupied-and-set step is a single atomic
/// operation per show: there is no gap between check and set for a
/// concurrent claimant to exploit.
pub struct InMemoryShowRepo {
    shows: DashMap<Uuid, Show>,
}

impl InMemoryShowRepo {
    pub fn new() -> Self {
        Self {
            shows: DashMap::new(),
        }
    }
}

impl Default for InMemoryShowRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShowRepository for InMemoryShowRepo {
    async fn insert_batch(&self, shows: Vec<Show>) -> Result<(), MarqueeError> {
        for show in shows {
            self.shows.insert(show.id, show);
        }
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Show>, MarqueeError> {
        Ok(self.shows.get(&id).map(|s| s.clone()))
    }

    async fn list_upcoming(&self, now: DateTime<Utc>) -> Result<Vec<Show>, MarqueeError> {
        let mut upcoming: Vec<Show> = self
            .shows
            .iter()
            .filter(|entry| entry.value().show_datetime >= now)
            .map(|entry| entry.value().clone())
            .collect();
        upcoming.sort_by_key(|s| s.show_datetime);
        Ok(upcoming)
    }

    async fn list_upcoming_for_movie(
        &self,
        movie_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Show>, MarqueeError> {
        let mut upcoming: Vec<Show> = self
            .shows
            .iter()
            .filter(|entry| {
                entry.value().movie_id == movie_id && entry.value().show_datetime >= now
            })
            .map(|entry| entry.value().clone())
            .collect();
        upcoming.sort_by_key(|s| s.show_datetime);
        Ok(upcoming)
    }

    async fn claim_seats(
        &self,
        show_id: Uuid,
        user_id: &str,
        seats: &[String],
    ) -> Result<(), MarqueeError> {
        let mut show = self
            .shows
            .get_mut(&show_id)
            .ok_or_else(|| MarqueeError::not_found("Show", show_id))?;
        show.claim_seats(user_id, seats)
    }

    async fn release_seats(
        &self,
        show_id: Uuid,
        user_id: &str,
        seats: &[String],
    ) -> Result<(), MarqueeError> {
        // Missing show: the compensation path stays a no-op
        if let Some(mut show) = self.shows.get_mut(&show_id) {
            let freed = show.release_seats(user_id, seats);
            tracing::debug!(%show_id, freed, "released seats");
        }
        Ok(())
    }
}
