pub mod movies;
pub mod shows;
pub mod tmdb;

pub use movies::MovieCatalog;
pub use shows::{MovieAvailability, ScheduleEntry, ShowCatalog, ShowTime, UpcomingShow};
pub use tmdb::TmdbProvider;
