use owo_colors::OwoColorize;
use serde_json::json;

use super::{Backends, CommandOutput};
use crate::error::Result;
use crate::router::{LoginOutcome, Screens};
use crate::tui::TerminalScreens;

/// Run the credential form, then exit.
pub async fn cmd_login(backends: &Backends) -> Result<CommandOutput> {
    let mut screens = TerminalScreens;
    login_with(&mut screens, backends).await
}

pub(crate) async fn login_with(
    screens: &mut dyn Screens,
    backends: &Backends,
) -> Result<CommandOutput> {
    match screens.login(backends.auth.clone()).await? {
        LoginOutcome::SignedIn(session) => Ok(CommandOutput::new(json!({
            "signed_in": true,
            "email": session.email,
        }))
        .with_text(format!("Signed in as {}", session.email.cyan()))),
        LoginOutcome::Cancelled => Ok(CommandOutput::new(json!({ "signed_in": false }))
            .with_text("Login cancelled".dimmed().to_string())),
    }
}

/// Sign out and forget the stored session.
pub async fn cmd_logout(backends: &Backends) -> Result<CommandOutput> {
    let had_session = backends.auth.get_session().await.ok().flatten().is_some();
    backends.auth.sign_out().await?;

    let text = if had_session {
        "Signed out".to_string()
    } else {
        "Not signed in".dimmed().to_string()
    };
    Ok(CommandOutput::new(json!({ "signed_out": had_session })).with_text(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthProvider, MemoryAuth, Session};
    use crate::config::Config;
    use crate::dashboard::ExitRequest;
    use crate::router::DashboardLaunch;
    use crate::store::{MemoryStore, TicketStore};
    use std::sync::Arc;
    use std::time::Duration;

    struct ScriptedLogin {
        email: Option<&'static str>,
    }

    #[async_trait::async_trait(?Send)]
    impl Screens for ScriptedLogin {
        async fn splash(&mut self, _hold: Duration) -> Result<()> {
            Ok(())
        }

        async fn login(&mut self, auth: Arc<dyn AuthProvider>) -> Result<LoginOutcome> {
            match self.email {
                Some(email) => Ok(LoginOutcome::SignedIn(
                    auth.sign_in_with_password(email, "rahasia").await?,
                )),
                None => Ok(LoginOutcome::Cancelled),
            }
        }

        async fn dashboard(&mut self, _launch: DashboardLaunch) -> Result<ExitRequest> {
            Ok(ExitRequest::Quit)
        }
    }

    fn backends(auth: Arc<MemoryAuth>) -> Backends {
        Backends {
            auth,
            connect: Box::new(|_: &Session| {
                let store: Arc<dyn TicketStore> = Arc::new(MemoryStore::new(Vec::new()));
                Ok(store)
            }),
            config: Config::default(),
        }
    }

    #[tokio::test]
    async fn test_login_reports_email() {
        let auth = Arc::new(MemoryAuth::new().with_user("staff@example.com", "rahasia"));
        let backends = backends(auth.clone());
        let mut screens = ScriptedLogin {
            email: Some("staff@example.com"),
        };

        let output = login_with(&mut screens, &backends).await.unwrap();
        assert_eq!(output.json()["email"], "staff@example.com");
        assert!(auth.is_signed_in());
    }

    #[tokio::test]
    async fn test_login_cancelled() {
        let backends = backends(Arc::new(MemoryAuth::new()));
        let mut screens = ScriptedLogin { email: None };
        let output = login_with(&mut screens, &backends).await.unwrap();
        assert_eq!(output.json()["signed_in"], false);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let auth = Arc::new(MemoryAuth::new().signed_in("staff@example.com"));
        let backends = backends(auth.clone());

        let output = cmd_logout(&backends).await.unwrap();
        assert_eq!(output.json()["signed_out"], true);
        assert!(!auth.is_signed_in());
        assert_eq!(auth.sign_out_calls(), 1);
    }
}
