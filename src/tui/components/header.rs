//! App header bar component
//!
//! Shows the app title, the signed-in user, and the refresh indicator.

use iocraft::prelude::*;

use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct HeaderProps {
    /// Email of the signed-in user
    pub user: Option<String>,
    /// Label of the active status filter
    pub filter: Option<String>,
    /// Manual refresh in progress
    pub refreshing: bool,
    /// A background fetch is in flight
    pub loading: bool,
}

/// Header bar along the top of the dashboard
#[component]
pub fn Header(props: &HeaderProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let title = match &props.user {
        Some(user) => format!("Helpdesk - {}", user),
        None => "Helpdesk".to_string(),
    };

    let activity = if props.refreshing {
        Some("Refreshing...")
    } else if props.loading {
        Some("Loading...")
    } else {
        None
    };

    element! {
        View(
            width: 100pct,
            height: 1,
            flex_direction: FlexDirection::Row,
            flex_shrink: 0.0,
            justify_content: JustifyContent::SpaceBetween,
            padding_left: 1,
            padding_right: 1,
            background_color: theme.highlight,
        ) {
            Text(
                content: title,
                color: theme.highlight_text,
                weight: Weight::Bold,
            )
            View(flex_direction: FlexDirection::Row, gap: 2) {
                #(activity.map(|text| element! {
                    Text(content: text, color: theme.highlight_text, weight: Weight::Bold)
                }))
                #(props.filter.clone().map(|filter| element! {
                    Text(
                        content: format!("Filter: {}", filter),
                        color: theme.highlight_text,
                    )
                }))
            }
        }
    }
}
