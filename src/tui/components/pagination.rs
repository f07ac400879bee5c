//! "Showing a-b of n tickets" plus the page counter

use iocraft::prelude::*;

use crate::dashboard::PageSummary;
use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct PaginationProps {
    pub summary: Option<PageSummary>,
}

#[component]
pub fn Pagination(props: &PaginationProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let Some(summary) = props.summary else {
        return element! { View(height: 1) };
    };

    let at_first = summary.page <= 1;
    let at_last = summary.page >= summary.page_count;

    element! {
        View(
            width: 100pct,
            height: 1,
            flex_direction: FlexDirection::Row,
            flex_shrink: 0.0,
            justify_content: JustifyContent::SpaceBetween,
            padding_left: 1,
            padding_right: 1,
        ) {
            Text(content: summary.range_text(), color: theme.text_dimmed)
            View(flex_direction: FlexDirection::Row, gap: 1) {
                Text(content: "< p", color: if at_first { theme.border } else { theme.highlight })
                Text(content: summary.page_text(), color: theme.text)
                Text(content: "n >", color: if at_last { theme.border } else { theme.highlight })
            }
        }
    }
}
