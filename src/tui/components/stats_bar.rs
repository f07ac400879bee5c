//! Aggregate counts over the whole working set

use iocraft::prelude::*;

use crate::dashboard::TicketStats;
use crate::tui::theme::theme;
use crate::types::TicketStatus;

#[derive(Default, Props)]
pub struct StatsBarProps {
    pub stats: TicketStats,
}

#[component]
pub fn StatsBar(props: &StatsBarProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let stats = props.stats;

    let cells = std::iter::once(("Total", stats.total, theme.text)).chain(
        TicketStatus::ALL
            .into_iter()
            .map(|status| (status.label(), stats.count(status), theme.status_color(status))),
    );

    element! {
        View(
            width: 100pct,
            flex_direction: FlexDirection::Row,
            flex_shrink: 0.0,
            column_gap: 1,
        ) {
            #(cells.map(|(label, count, color)| element! {
                View(
                    flex_grow: 1.0,
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    border_style: BorderStyle::Round,
                    border_color: theme.border,
                ) {
                    Text(content: count.to_string(), color: color, weight: Weight::Bold)
                    Text(content: label, color: theme.text_dimmed)
                }
            }))
        }
    }
}
