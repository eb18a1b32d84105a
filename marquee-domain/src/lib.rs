pub mod booking;
pub mod error;
pub mod movie;
pub mod show;

pub use booking::{Booking, PaidTransition};
pub use error::MarqueeError;
pub use movie::{CastMember, Genre, Movie};
pub use show::{seat_label_is_valid, Show};
