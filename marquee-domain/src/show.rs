use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::MarqueeError;

/// Venue layout: rows A..J, nine seats per row.
pub const SEAT_ROWS: &[char] = &['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J'];
pub const SEATS_PER_ROW: u8 = 9;

/// A seat label is a row letter followed by a 1-based seat number, e.g. "A1".
pub fn seat_label_is_valid(label: &str) -> bool {
    let mut chars = label.chars();
    let Some(row) = chars.next() else {
        return false;
    };
    if !SEAT_ROWS.contains(&row) {
        return false;
    }
    match chars.as_str().parse::<u8>() {
        Ok(n) => (1..=SEATS_PER_ROW).contains(&n),
        Err(_) => false,
    }
}

/// One scheduled screening of a movie.
///
/// `occupied_seats` maps seat label -> holder (user id). Each label maps to
/// at most one holder; the map is mutated only through [`Show::claim_seats`]
/// and [`Show::release_seats`], never by ad hoc field writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Show {
    pub id: Uuid,
    pub movie_id: Uuid,
    pub show_datetime: DateTime<Utc>,
    /// Per-seat price in minor currency units.
    pub price: i64,
    pub occupied_seats: HashMap<String, String>,
}

impl Show {
    pub fn new(movie_id: Uuid, show_datetime: DateTime<Utc>, price: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            movie_id,
            show_datetime,
            price,
            occupied_seats: HashMap::new(),
        }
    }

    /// Labels from `seats` that are already held by someone.
    pub fn conflicting_seats(&self, seats: &[String]) -> Vec<String> {
        seats
            .iter()
            .filter(|s| self.occupied_seats.contains_key(*s))
            .cloned()
            .collect()
    }

    /// Claim every label in `seats` for `user_id`, all-or-nothing.
    ///
    /// On any conflict the map is left untouched and the conflicting labels
    /// are reported. Callers must hold exclusive access to the show for the
    /// duration of the call; that makes this the atomic
    /// check-unoccupied-and-set step.
    pub fn claim_seats(&mut self, user_id: &str, seats: &[String]) -> Result<(), MarqueeError> {
        let conflicts = self.conflicting_seats(seats);
        if !conflicts.is_empty() {
            return Err(MarqueeError::SeatUnavailable(conflicts));
        }
        for seat in seats {
            self.occupied_seats
                .insert(seat.clone(), user_id.to_string());
        }
        Ok(())
    }

    /// Remove each label in `seats`, but only where it still maps to
    /// `user_id`. Returns the number of seats actually freed.
    pub fn release_seats(&mut self, user_id: &str, seats: &[String]) -> usize {
        let mut freed = 0;
        for seat in seats {
            if self.occupied_seats.get(seat).map(String::as_str) == Some(user_id) {
                self.occupied_seats.remove(seat);
                freed += 1;
            }
        }
        freed
    }
}
