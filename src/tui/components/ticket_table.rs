//! The paginated ticket table

use iocraft::prelude::*;

use crate::display::{action_hint, format_created_at_in, truncate};
use crate::tui::theme::theme;
use crate::types::{Ticket, TicketStatus};
use jiff::tz::TimeZone;

const ISSUE_CHARS: usize = 60;

/// One pre-formatted table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub code: String,
    pub created: String,
    pub reporter: String,
    pub phone: String,
    pub division: String,
    pub issue: String,
    pub status: TicketStatus,
    pub action: &'static str,
}

impl TableRow {
    pub fn from_ticket(ticket: &Ticket, tz: &TimeZone) -> Self {
        Self {
            code: ticket.ticket_code.clone(),
            created: format_created_at_in(ticket.created_at, tz),
            reporter: ticket.sender_display().to_string(),
            phone: ticket.phone_display().to_string(),
            division: ticket.division_display().to_string(),
            issue: truncate(&ticket.issue_details, ISSUE_CHARS),
            status: ticket.status,
            action: action_hint(ticket.status),
        }
    }
}

#[derive(Default, Props)]
pub struct TicketTableProps {
    pub rows: Vec<TableRow>,
    /// Row index within `rows`
    pub selected: usize,
}

#[component]
pub fn TicketTable(props: &TicketTableProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    element! {
        View(
            width: 100pct,
            flex_grow: 1.0,
            flex_direction: FlexDirection::Column,
            border_style: BorderStyle::Round,
            border_color: theme.border_focused,
        ) {
            View(
                height: 1,
                width: 100pct,
                flex_direction: FlexDirection::Row,
                padding_left: 1,
                padding_right: 1,
            ) {
                View(width: 2, flex_shrink: 0.0) {}
                View(width: 12, flex_shrink: 0.0) {
                    Text(content: "Ticket", color: theme.text_dimmed, weight: Weight::Bold)
                }
                View(width: 14, flex_shrink: 0.0) {
                    Text(content: "Created", color: theme.text_dimmed, weight: Weight::Bold)
                }
                View(width: 18, flex_shrink: 0.0) {
                    Text(content: "Reporter", color: theme.text_dimmed, weight: Weight::Bold)
                }
                View(width: 15, flex_shrink: 0.0) {
                    Text(content: "Phone", color: theme.text_dimmed, weight: Weight::Bold)
                }
                View(width: 14, flex_shrink: 0.0) {
                    Text(content: "Division", color: theme.text_dimmed, weight: Weight::Bold)
                }
                View(flex_grow: 1.0, overflow: Overflow::Hidden) {
                    Text(content: "Issue", color: theme.text_dimmed, weight: Weight::Bold)
                }
                View(width: 10, flex_shrink: 0.0) {
                    Text(content: "Status", color: theme.text_dimmed, weight: Weight::Bold)
                }
                View(width: 22, flex_shrink: 0.0) {
                    Text(content: "Action", color: theme.text_dimmed, weight: Weight::Bold)
                }
            }
            #(props.rows.iter().enumerate().map(|(i, row)| element! {
                TicketTableRow(row: row.clone(), is_selected: i == props.selected)
            }))
        }
    }
}

#[derive(Default, Props)]
pub struct TicketTableRowProps {
    pub row: Option<TableRow>,
    pub is_selected: bool,
}

#[component]
pub fn TicketTableRow(props: &TicketTableRowProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let Some(row) = props.row.clone() else {
        return element! { View(height: 1) };
    };

    let bg_color = props.is_selected.then_some(theme.highlight);
    let text_color = if props.is_selected {
        theme.highlight_text
    } else {
        theme.text
    };
    let status_color = if props.is_selected {
        theme.highlight_text
    } else {
        theme.status_color(row.status)
    };
    let indicator = if props.is_selected { ">" } else { " " };

    element! {
        View(
            height: 1,
            width: 100pct,
            flex_direction: FlexDirection::Row,
            padding_left: 1,
            padding_right: 1,
            background_color: bg_color,
        ) {
            View(width: 2, flex_shrink: 0.0) {
                Text(content: indicator, color: text_color)
            }
            View(width: 12, flex_shrink: 0.0, overflow: Overflow::Hidden) {
                Text(
                    content: row.code,
                    color: if props.is_selected { theme.highlight_text } else { theme.code_color },
                )
            }
            View(width: 14, flex_shrink: 0.0) {
                Text(content: row.created, color: text_color)
            }
            View(width: 18, flex_shrink: 0.0, overflow: Overflow::Hidden) {
                Text(content: row.reporter, color: text_color)
            }
            View(width: 15, flex_shrink: 0.0, overflow: Overflow::Hidden) {
                Text(content: row.phone, color: text_color)
            }
            View(width: 14, flex_shrink: 0.0, overflow: Overflow::Hidden) {
                Text(content: row.division, color: text_color)
            }
            View(flex_grow: 1.0, overflow: Overflow::Hidden) {
                Text(content: row.issue, color: text_color)
            }
            View(width: 10, flex_shrink: 0.0) {
                Text(content: row.status.label(), color: status_color, weight: Weight::Bold)
            }
            View(width: 22, flex_shrink: 0.0, overflow: Overflow::Hidden) {
                Text(content: row.action, color: theme.text_dimmed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;

    #[test]
    fn test_row_from_ticket() {
        let ticket = Ticket {
            id: 3,
            ticket_code: "TKT-0003".into(),
            sender_name: None,
            phone_number: "62811".into(),
            division: Some("Keuangan".into()),
            issue_details: "Printer\nmacet".into(),
            status: TicketStatus::Selesai,
            created_at: "2025-01-15T08:30:00Z".parse::<Timestamp>().unwrap(),
        };
        let row = TableRow::from_ticket(&ticket, &TimeZone::UTC);
        assert_eq!(row.code, "TKT-0003");
        assert_eq!(row.created, "15 Jan 08:30");
        assert_eq!(row.reporter, ticket.sender_display());
        assert_eq!(row.phone, "62811");
        assert_eq!(row.division, "Keuangan");
        assert_eq!(row.issue, "Printer macet");
        assert_eq!(row.action, "Done");
    }
}
