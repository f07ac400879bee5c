//! Ticket builders shared by the integration tests.

use helpdesk::{Ticket, TicketStatus};
use jiff::{SignedDuration, Timestamp};

/// Fixed "now" so ordering never depends on the wall clock
pub fn base_time() -> Timestamp {
    "2025-03-01T09:00:00Z".parse().expect("valid timestamp")
}

/// A ticket created `minutes_ago` before [`base_time`]
pub fn ticket(id: i64, status: TicketStatus, minutes_ago: i64) -> Ticket {
    Ticket {
        id,
        ticket_code: format!("TKT-{id:04}"),
        sender_name: Some(format!("Pelapor {id}")),
        phone_number: format!("62812000{id:04}"),
        division: Some("Umum".to_string()),
        issue_details: format!("Masalah nomor {id}"),
        status,
        created_at: base_time() - SignedDuration::from_mins(minutes_ago),
    }
}

/// `n` OPEN tickets, newest first (id 1 is the newest)
pub fn open_tickets(n: i64) -> Vec<Ticket> {
    (1..=n).map(|id| ticket(id, TicketStatus::Open, id)).collect()
}
