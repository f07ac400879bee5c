use serde_json::json;

use super::{Backends, CommandOutput};
use crate::dashboard::DashboardState;
use crate::display::{format_stats, format_ticket_table};
use crate::error::Result;
use crate::types::TicketStatus;

/// Options for `helpdesk ls`
#[derive(Debug, Clone, Default)]
pub struct LsOptions {
    /// 1-based page; out-of-range pages clamp to the nearest valid one
    pub page: usize,
    pub status: Option<TicketStatus>,
}

/// List one page of tickets
pub async fn cmd_ls(backends: &Backends, options: LsOptions) -> Result<CommandOutput> {
    let controller = backends.load_dashboard().await?;
    controller.update(|state| {
        state.set_filter(options.status);
        state.go_to_page(options.page.max(1));
    });
    Ok(ls_output(&controller.snapshot()))
}

pub(crate) fn ls_output(state: &DashboardState) -> CommandOutput {
    let visible = state.visible_slice();
    let summary = state.page_summary();

    let json_output = json!({
        "page": summary.page,
        "page_count": summary.page_count,
        "total": summary.total,
        "status": state.status_filter,
        "tickets": visible,
    });

    let text = if visible.is_empty() {
        "No tickets".to_string()
    } else {
        format!(
            "{}\n{}\n{}",
            format_stats(&state.stats()),
            format_ticket_table(&visible),
            summary
        )
    };

    CommandOutput::new(json_output).with_text(text)
}
