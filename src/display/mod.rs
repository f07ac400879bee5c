//! Terminal formatting shared by the CLI commands.

use jiff::Timestamp;
use jiff::tz::TimeZone;
use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::dashboard::TicketStats;
use crate::types::{Ticket, TicketStatus};

/// Longest issue excerpt shown in a table cell.
const ISSUE_EXCERPT_CHARS: usize = 48;

pub fn format_status_colored(status: TicketStatus) -> String {
    format_status_colored_with_format(status, |s| format!("[{}]", s))
}

pub fn format_status_colored_with_format<F>(status: TicketStatus, format_fn: F) -> String
where
    F: Fn(&str) -> String,
{
    let badge = format_fn(status.label());
    match status {
        TicketStatus::Open => badge.red().to_string(),
        TicketStatus::Proses => badge.yellow().to_string(),
        TicketStatus::Selesai => badge.green().to_string(),
    }
}

/// Short creation time such as `15 Jan 08:30`, in the system time zone.
pub fn format_created_at(ts: Timestamp) -> String {
    format_created_at_in(ts, &TimeZone::system())
}

pub fn format_created_at_in(ts: Timestamp, tz: &TimeZone) -> String {
    ts.to_zoned(tz.clone()).strftime("%-d %b %H:%M").to_string()
}

/// Text for the action column: the key that advances the ticket, or "Done".
pub fn action_hint(status: TicketStatus) -> &'static str {
    match status {
        TicketStatus::Open => "s: start  d: complete",
        TicketStatus::Proses => "d: complete",
        TicketStatus::Selesai => "Done",
    }
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let kept: String = single_line.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// A row in the ticket table
#[derive(Tabled)]
struct TicketRow {
    #[tabled(rename = "Ticket")]
    code: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Reporter")]
    reporter: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Division")]
    division: String,
    #[tabled(rename = "Issue")]
    issue: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl TicketRow {
    fn from_ticket(ticket: &Ticket, tz: &TimeZone) -> Self {
        Self {
            code: ticket.ticket_code.clone(),
            created: format_created_at_in(ticket.created_at, tz),
            reporter: ticket.sender_display().to_string(),
            phone: ticket.phone_display().to_string(),
            division: ticket.division_display().to_string(),
            issue: truncate(&ticket.issue_details, ISSUE_EXCERPT_CHARS),
            status: ticket.status.label().to_string(),
        }
    }
}

/// Render tickets as a plain table. Colors are left out so column widths line up.
pub fn format_ticket_table(tickets: &[&Ticket]) -> String {
    format_ticket_table_in(tickets, &TimeZone::system())
}

pub fn format_ticket_table_in(tickets: &[&Ticket], tz: &TimeZone) -> String {
    let rows: Vec<TicketRow> = tickets
        .iter()
        .map(|t| TicketRow::from_ticket(t, tz))
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn format_stats(stats: &TicketStats) -> String {
    format!(
        "{} {}   {} {}   {} {}   {} {}",
        "Total".bold(),
        stats.total,
        TicketStatus::Open.label().red(),
        stats.open,
        TicketStatus::Proses.label().yellow(),
        stats.process,
        TicketStatus::Selesai.label().green(),
        stats.done,
    )
}

/// Multi-line detail view of one ticket.
pub fn format_ticket_detail(ticket: &Ticket) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        ticket.ticket_code.cyan().bold(),
        format_status_colored(ticket.status)
    ));
    out.push_str(&format!(
        "{:<10} {}\n",
        "Created:".dimmed(),
        format_created_at(ticket.created_at)
    ));
    out.push_str(&format!(
        "{:<10} {} ({})\n",
        "Reporter:".dimmed(),
        ticket.sender_display(),
        ticket.phone_display()
    ));
    out.push_str(&format!(
        "{:<10} {}\n",
        "Division:".dimmed(),
        ticket.division_display()
    ));
    out.push('\n');
    out.push_str(&ticket.issue_details);
    out
}
