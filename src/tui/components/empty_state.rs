//! Placeholder shown in place of the ticket table

use iocraft::prelude::*;

use crate::tui::theme::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyStateKind {
    /// First fetch still running
    #[default]
    Loading,
    /// The backend has no tickets
    NoTickets,
    /// Tickets exist but none has the filtered status
    NoMatches,
    /// The first fetch failed
    LoadFailed,
}

#[derive(Default, Props)]
pub struct EmptyStateProps {
    pub kind: EmptyStateKind,
    /// Extra detail, e.g. the fetch error
    pub detail: Option<String>,
}

#[component]
pub fn EmptyState(props: &EmptyStateProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let (title, message) = match props.kind {
        EmptyStateKind::Loading => ("Loading", "Fetching tickets..."),
        EmptyStateKind::NoTickets => ("No Tickets", "No tickets have been reported yet."),
        EmptyStateKind::NoMatches => (
            "No Matches",
            "No tickets have this status. Press 'f' to change the filter.",
        ),
        EmptyStateKind::LoadFailed => (
            "Could Not Load Tickets",
            "Press 'r' to try again.",
        ),
    };
    let title_color = if props.kind == EmptyStateKind::LoadFailed {
        theme.error
    } else {
        theme.text
    };

    element! {
        View(
            width: 100pct,
            flex_grow: 1.0,
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            padding: 2,
            border_style: BorderStyle::Round,
            border_color: theme.border,
        ) {
            Text(content: title, color: title_color, weight: Weight::Bold)
            View(margin_top: 1, max_width: 60) {
                Text(content: message, color: theme.text_dimmed)
            }
            #(props.detail.clone().map(|detail| element! {
                View(margin_top: 1, max_width: 60) {
                    Text(content: detail, color: theme.text_dimmed)
                }
            }))
        }
    }
}

/// Which placeholder fits, or `None` when there are rows to show.
pub fn compute_empty_state(
    loaded: bool,
    has_error: bool,
    total: usize,
    filtered: usize,
) -> Option<EmptyStateKind> {
    if !loaded {
        return Some(if has_error {
            EmptyStateKind::LoadFailed
        } else {
            EmptyStateKind::Loading
        });
    }
    if total == 0 {
        Some(EmptyStateKind::NoTickets)
    } else if filtered == 0 {
        Some(EmptyStateKind::NoMatches)
    } else {
        None
    }
}
