use serde_json::json;

use super::{Backends, CommandOutput};
use crate::display::format_ticket_detail;
use crate::error::{HelpdeskError, Result};

/// Show one ticket by id or ticket code
pub async fn cmd_show(backends: &Backends, key: &str) -> Result<CommandOutput> {
    let controller = backends.load_dashboard().await?;
    let state = controller.snapshot();
    let ticket = state
        .find(key)
        .ok_or_else(|| HelpdeskError::TicketNotFound(key.to_string()))?;

    Ok(CommandOutput::new(json!(ticket)).with_text(format_ticket_detail(ticket)))
}
