use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use marquee_core::{MovieRepository, ShowRepository};
use marquee_domain::{MarqueeError, Movie, Show};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One date with its screening times, as submitted by the admin surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, local to the venue, stored as UTC
    pub times: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct UpcomingShow {
    pub show: Show,
    pub movie: Movie,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShowTime {
    pub time: DateTime<Utc>,
    pub show_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct MovieAvailability {
    pub movie: Movie,
    /// Upcoming shows grouped by calendar date.
    pub dates: BTreeMap<String, Vec<ShowTime>>,
}

/// Scheduled screenings: batch creation and the public read surface.
pub struct ShowCatalog {
    shows: Arc<dyn ShowRepository>,
    movies: Arc<dyn MovieRepository>,
}

impl ShowCatalog {
    pub fn new(shows: Arc<dyn ShowRepository>, movies: Arc<dyn MovieRepository>) -> Self {
        Self { shows, movies }
    }

    /// Expand every (date, time) combination into a Show and persist the
    /// whole batch, all-or-nothing: every datetime is validated before
    /// anything is written, and the first invalid entry fails the batch.
    pub async fn create_shows(
        &self,
        movie_id: Uuid,
        price: i64,
        entries: &[ScheduleEntry],
    ) -> Result<Vec<Show>, MarqueeError> {
        if self.movies.get(movie_id).await?.is_none() {
            return Err(MarqueeError::not_found("Movie", movie_id));
        }
        if price <= 0 {
            return Err(MarqueeError::Validation(
                "show price must be positive".to_string(),
            ));
        }

        let mut batch = Vec::new();
        for entry in entries {
            for time in &entry.times {
                let show_datetime = parse_show_datetime(&entry.date, time)?;
                batch.push(Show::new(movie_id, show_datetime, price));
            }
        }

        self.shows.insert_batch(batch.clone()).await?;
        tracing::info!(%movie_id, created = batch.len(), "shows added");
        Ok(batch)
    }

    /// All upcoming shows joined with their movie, ascending by time.
    pub async fn list_upcoming(&self) -> Result<Vec<UpcomingShow>, MarqueeError> {
        let mut result = Vec::new();
        for show in self.shows.list_upcoming(Utc::now()).await? {
            let Some(movie) = self.movies.get(show.movie_id).await? else {
                tracing::warn!(show_id = %show.id, "show references unknown movie, skipping");
                continue;
            };
            result.push(UpcomingShow { show, movie });
        }
        Ok(result)
    }

    /// Upcoming shows for one movie, grouped by calendar date.
    pub async fn availability(&self, movie_id: Uuid) -> Result<MovieAvailability, MarqueeError> {
        let movie = self
            .movies
            .get(movie_id)
            .await?
            .ok_or_else(|| MarqueeError::not_found("Movie", movie_id))?;

        let mut dates: BTreeMap<String, Vec<ShowTime>> = BTreeMap::new();
        for show in self
            .shows
            .list_upcoming_for_movie(movie_id, Utc::now())
            .await?
        {
            let date = show.show_datetime.format("%Y-%m-%d").to_string();
            dates.entry(date).or_default().push(ShowTime {
                time: show.show_datetime,
                show_id: show.id,
            });
        }

        Ok(MovieAvailability { movie, dates })
    }
}

fn parse_show_datetime(date: &str, time: &str) -> Result<DateTime<Utc>, MarqueeError> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| MarqueeError::Validation(format!("invalid show date: {date}")))?;
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| MarqueeError::Validation(format!("invalid show time: {time}")))?;
    Ok(date.and_time(time).and_utc())
}
