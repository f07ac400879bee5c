//! The router's screens, rendered fullscreen with iocraft

use std::sync::{Arc, Mutex};
use std::time::Duration;

use iocraft::prelude::*;

use crate::auth::AuthProvider;
use crate::dashboard::ExitRequest;
use crate::error::{HelpdeskError, Result};
use crate::router::{DashboardLaunch, LoginOutcome, Screens};
use crate::tui::dashboard::TicketDashboard;
use crate::tui::login::{LoginForm, LoginSlot};
use crate::tui::splash::Splash;

fn tui_error(e: std::io::Error) -> HelpdeskError {
    HelpdeskError::Other(format!("TUI error: {}", e))
}

/// Each screen takes over the terminal until it exits.
#[derive(Debug, Default)]
pub struct TerminalScreens;

#[async_trait::async_trait(?Send)]
impl Screens for TerminalScreens {
    async fn splash(&mut self, hold: Duration) -> Result<()> {
        element!(Splash(hold)).fullscreen().await.map_err(tui_error)
    }

    async fn login(&mut self, auth: Arc<dyn AuthProvider>) -> Result<LoginOutcome> {
        let slot: LoginSlot = Arc::new(Mutex::new(None));
        element!(LoginForm(auth: Some(auth), result: Some(slot.clone())))
            .fullscreen()
            .await
            .map_err(tui_error)?;

        let session = slot.lock().unwrap_or_else(|e| e.into_inner()).take();
        Ok(match session {
            Some(session) => LoginOutcome::SignedIn(session),
            None => LoginOutcome::Cancelled,
        })
    }

    async fn dashboard(&mut self, launch: DashboardLaunch) -> Result<ExitRequest> {
        let controller = launch.controller.clone();
        element!(TicketDashboard(
            controller: Some(launch.controller),
            user_email: Some(launch.user_email),
            poll_interval: Some(launch.poll_interval),
        ))
        .fullscreen()
        .await
        .map_err(tui_error)?;

        Ok(controller.snapshot().exit.unwrap_or(ExitRequest::Quit))
    }
}
