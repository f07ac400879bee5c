use serde_json::json;

use super::{Backends, CommandOutput};
use crate::error::Result;
use crate::router::{App, Route};
use crate::tui::TerminalScreens;

/// Run the fullscreen app from `start` until the user quits.
pub async fn cmd_dashboard(backends: Backends, start: Route) -> Result<CommandOutput> {
    let Backends {
        auth,
        connect,
        config,
    } = backends;

    let mut app = App::new(auth, connect, TerminalScreens).with_config(&config);
    let history = app.run(start).await?;

    tracing::debug!(navigations = history.navigations().len(), "app exited");
    Ok(CommandOutput::new(json!({
        "navigations": history.navigations().len(),
    })))
}
