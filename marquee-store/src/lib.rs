pub mod app_config;
pub mod booking_repo;
pub mod movie_repo;
pub mod show_repo;

pub use booking_repo::InMemoryBookingRepo;
pub use movie_repo::InMemoryMovieRepo;
pub use show_repo::InMemoryShowRepo;
