//! One-shot CLI commands.
//!
//! Each command returns a [`CommandOutput`] carrying both a JSON value and a
//! human-readable rendering; `main` prints whichever the user asked for.

mod auth;
mod config;
mod dashboard;
mod ls;
mod show;
mod stats;
mod status;

pub use auth::{cmd_login, cmd_logout};
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use dashboard::cmd_dashboard;
pub use ls::{LsOptions, cmd_ls};
pub use show::cmd_show;
pub use stats::cmd_stats;
pub use status::{cmd_close, cmd_set_status, cmd_start};

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::auth::{AuthProvider, Session, SessionGuard, SupabaseAuth};
use crate::config::Config;
use crate::dashboard::DashboardController;
use crate::error::Result;
use crate::lifecycle::TransitionPolicy;
use crate::router::StoreConnector;
use crate::store::{SupabaseStore, TicketStore};

/// Output format flags shared by commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
}

/// Result of a command in both machine and human form.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn json(&self) -> &Value {
        &self.json
    }

    /// The text that [`CommandOutput::print`] would write.
    pub fn render(&self, output: OutputOptions) -> Result<String> {
        if output.json || self.text.is_none() {
            return Ok(serde_json::to_string_pretty(&self.json)?);
        }
        Ok(self.text.clone().unwrap_or_default())
    }

    pub fn print(&self, output: OutputOptions) -> Result<()> {
        println!("{}", self.render(output)?);
        Ok(())
    }
}

/// The external collaborators a command talks to.
pub struct Backends {
    pub auth: Arc<dyn AuthProvider>,
    pub connect: StoreConnector,
    pub config: Config,
}

impl Backends {
    /// Hosted backend as configured in `config.yaml` and the environment.
    pub fn from_config(config: Config) -> Result<Self> {
        let backend = config.backend()?;
        let auth: Arc<dyn AuthProvider> = Arc::new(SupabaseAuth::from_config(&config)?);
        let connect: StoreConnector = {
            let auth = auth.clone();
            Box::new(move |_: &Session| {
                let store: Arc<dyn TicketStore> =
                    Arc::new(SupabaseStore::new(backend.clone(), auth.clone())?);
                Ok(store)
            })
        };
        Ok(Self {
            auth,
            connect,
            config,
        })
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.config.transitions
    }

    pub fn refresh_hold(&self) -> Duration {
        self.config.dashboard.refresh_hold()
    }

    /// Require a session, connect the store, and load the ticket list.
    pub async fn load_dashboard(&self) -> Result<DashboardController> {
        let session = SessionGuard::new(self.auth.clone()).require().await?;
        let store = (self.connect)(&session)?;
        let controller = DashboardController::new(store, self.policy())
            .with_refresh_hold(self.refresh_hold());
        controller.refresh().await?;
        Ok(controller)
    }
}
