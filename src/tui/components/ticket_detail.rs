//! Ticket detail pane
//!
//! Shows the selected ticket with its contact number and the full issue text.

use iocraft::prelude::*;
use jiff::tz::TimeZone;

use crate::display::format_created_at_in;
use crate::tui::theme::theme;
use crate::types::Ticket;

/// Label/value pairs shown above the issue text
pub fn detail_fields(ticket: &Ticket, tz: &TimeZone) -> Vec<(&'static str, String)> {
    vec![
        ("Created", format_created_at_in(ticket.created_at, tz)),
        ("Reporter", ticket.sender_display().to_string()),
        ("Phone", ticket.phone_display().to_string()),
        ("Division", ticket.division_display().to_string()),
    ]
}

#[derive(Default, Props)]
pub struct TicketDetailProps {
    pub ticket: Option<Ticket>,
}

#[component]
pub fn TicketDetail(props: &TicketDetailProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let Some(ticket) = props.ticket.clone() else {
        return element! {
            View(
                width: 100pct,
                flex_grow: 1.0,
                border_style: BorderStyle::Round,
                border_color: theme.border,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
            ) {
                Text(content: "No ticket selected", color: theme.text_dimmed)
            }
        };
    };

    let fields = detail_fields(&ticket, &TimeZone::system());
    let status_color = theme.status_color(ticket.status);

    element! {
        View(
            width: 100pct,
            flex_grow: 1.0,
            border_style: BorderStyle::Round,
            border_color: theme.border_focused,
            flex_direction: FlexDirection::Column,
            overflow: Overflow::Hidden,
        ) {
            View(
                width: 100pct,
                padding_left: 1,
                padding_right: 1,
                flex_direction: FlexDirection::Row,
                column_gap: 2,
                border_edges: Edges::Bottom,
                border_style: BorderStyle::Single,
                border_color: theme.border,
            ) {
                Text(content: ticket.ticket_code.clone(), color: theme.code_color, weight: Weight::Bold)
                Text(content: ticket.status.label(), color: status_color, weight: Weight::Bold)
            }
            View(
                width: 100pct,
                padding_left: 1,
                padding_right: 1,
                padding_top: 1,
                flex_direction: FlexDirection::Column,
            ) {
                #(fields.into_iter().map(|(label, value)| element! {
                    View(flex_direction: FlexDirection::Row, height: 1) {
                        View(width: 10, flex_shrink: 0.0) {
                            Text(content: format!("{label}:"), color: theme.text_dimmed)
                        }
                        Text(content: value, color: theme.text)
                    }
                }))
            }
            View(
                width: 100pct,
                flex_grow: 1.0,
                padding: 1,
                overflow: Overflow::Hidden,
            ) {
                Text(content: ticket.issue_details.clone(), color: theme.text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TicketStatus;

    #[test]
    fn test_detail_fields_include_contact() {
        let ticket = Ticket {
            id: 9,
            ticket_code: "TKT-0009".into(),
            sender_name: Some("Sari".into()),
            phone_number: "6281377".into(),
            division: None,
            issue_details: "Email tidak bisa dikirim".into(),
            status: TicketStatus::Open,
            created_at: "2025-01-15T08:30:00Z".parse().unwrap(),
        };
        let fields = detail_fields(&ticket, &TimeZone::UTC);
        assert_eq!(
            fields,
            vec![
                ("Created", "15 Jan 08:30".to_string()),
                ("Reporter", "Sari".to_string()),
                ("Phone", "6281377".to_string()),
                ("Division", "-".to_string()),
            ]
        );
    }
}
