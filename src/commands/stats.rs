use serde_json::json;

use super::{Backends, CommandOutput};
use crate::display::format_stats;
use crate::error::Result;

/// Show total/open/process/done counts
pub async fn cmd_stats(backends: &Backends) -> Result<CommandOutput> {
    let controller = backends.load_dashboard().await?;
    let stats = controller.snapshot().stats();
    Ok(CommandOutput::new(json!(stats)).with_text(format_stats(&stats)))
}
