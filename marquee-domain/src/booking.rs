use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One reservation attempt against a show.
///
/// A booking is created unpaid, atomically with its seat claim, and reaches
/// exactly one terminal outcome: paid (seats kept) or released (record
/// deleted, seats freed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: String,
    pub show_id: Uuid,
    pub booked_seats: Vec<String>,
    /// Total amount in minor currency units (show price x seat count).
    pub amount: i64,
    pub is_paid: bool,
    pub payment_link: String,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(show_id: Uuid, user_id: &str, booked_seats: Vec<String>, amount: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            show_id,
            booked_seats,
            amount,
            is_paid: false,
            payment_link: String::new(),
            created_at: Utc::now(),
        }
    }
}

/// Outcome of the atomic unpaid -> paid transition.
///
/// `is_paid` is monotone: it only ever moves false -> true. Both no-op
/// outcomes exist so that duplicate gateway callbacks stay harmless.
#[derive(Debug)]
pub enum PaidTransition {
    /// The booking was unpaid and is now paid; carries the updated record.
    Confirmed(Booking),
    AlreadyPaid,
    Missing,
}
