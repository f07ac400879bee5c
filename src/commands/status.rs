use owo_colors::OwoColorize;
use serde_json::json;

use super::{Backends, CommandOutput};
use crate::dashboard::DashboardController;
use crate::display::format_status_colored;
use crate::error::{HelpdeskError, Result};
use crate::lifecycle::Transition;
use crate::types::TicketStatus;

/// OPEN -> PROSES
pub async fn cmd_start(backends: &Backends, key: &str) -> Result<CommandOutput> {
    apply_transition(backends, key, Transition::Start).await
}

/// Mark a ticket SELESAI
pub async fn cmd_close(backends: &Backends, key: &str) -> Result<CommandOutput> {
    apply_transition(backends, key, Transition::Complete).await
}

/// Set an explicit status, subject to the configured transition policy
pub async fn cmd_set_status(
    backends: &Backends,
    key: &str,
    status: TicketStatus,
) -> Result<CommandOutput> {
    apply_transition(backends, key, Transition::SetStatus(status)).await
}

async fn apply_transition(
    backends: &Backends,
    key: &str,
    transition: Transition,
) -> Result<CommandOutput> {
    let controller = backends.load_dashboard().await?;
    transition_by_key(&controller, key, transition).await
}

pub(crate) async fn transition_by_key(
    controller: &DashboardController,
    key: &str,
    transition: Transition,
) -> Result<CommandOutput> {
    let (id, code, previous) = {
        let state = controller.snapshot();
        let ticket = state
            .find(key)
            .ok_or_else(|| HelpdeskError::TicketNotFound(key.to_string()))?;
        (ticket.id, ticket.ticket_code.clone(), ticket.status)
    };

    let status = controller.update_status(id, transition).await?;

    let text = format!(
        "{} {} -> {}",
        code.cyan(),
        format_status_colored(previous),
        format_status_colored(status)
    );
    Ok(CommandOutput::new(json!({
        "id": id,
        "ticket_code": code,
        "previous_status": previous,
        "status": status,
    }))
    .with_text(text))
}
