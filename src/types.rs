use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HelpdeskError;

/// Rows per dashboard page.
pub const PAGE_SIZE: usize = 10;

/// Name of the backend table holding tickets.
pub const TICKETS_TABLE: &str = "tickets";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketStatus {
    Open,
    Proses,
    Selesai,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 3] = [
        TicketStatus::Open,
        TicketStatus::Proses,
        TicketStatus::Selesai,
    ];

    /// Position in the OPEN -> PROSES -> SELESAI progression.
    pub fn rank(self) -> u8 {
        match self {
            TicketStatus::Open => 0,
            TicketStatus::Proses => 1,
            TicketStatus::Selesai => 2,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, TicketStatus::Selesai)
    }

    /// Badge label shown to staff
    pub fn label(self) -> &'static str {
        match self {
            TicketStatus::Open => "Menunggu",
            TicketStatus::Proses => "Diproses",
            TicketStatus::Selesai => "Selesai",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Open => "OPEN",
            TicketStatus::Proses => "PROSES",
            TicketStatus::Selesai => "SELESAI",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = HelpdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(TicketStatus::Open),
            "proses" | "process" | "in_progress" => Ok(TicketStatus::Proses),
            "selesai" | "done" => Ok(TicketStatus::Selesai),
            _ => Err(HelpdeskError::InvalidStatus(s.to_string())),
        }
    }
}

pub const VALID_STATUSES: &[&str] = &["OPEN", "PROSES", "SELESAI"];

/// A helpdesk ticket as stored in the backend table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub ticket_code: String,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub division: Option<String>,
    #[serde(default)]
    pub issue_details: String,
    pub status: TicketStatus,
    pub created_at: Timestamp,
}

impl Ticket {
    /// Reporter name, falling back to "Anonymous" when absent or blank.
    pub fn sender_display(&self) -> &str {
        match self.sender_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => "Anonymous",
        }
    }

    /// Contact number, or "-" when the reporter left none.
    pub fn phone_display(&self) -> &str {
        match self.phone_number.trim() {
            "" => "-",
            phone => phone,
        }
    }

    pub fn division_display(&self) -> &str {
        match self.division.as_deref().map(str::trim) {
            Some(division) if !division.is_empty() => division,
            _ => "-",
        }
    }

    /// Whether `key` names this ticket, either by numeric id or by ticket code.
    pub fn matches_key(&self, key: &str) -> bool {
        let key = key.trim();
        self.ticket_code.eq_ignore_ascii_case(key) || key.parse::<i64>().ok() == Some(self.id)
    }
}

/// Sort tickets newest first, the order the backend query returns.
pub fn sort_newest_first(tickets: &mut [Ticket]) {
    tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
