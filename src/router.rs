//! Route handling between the splash, login, and dashboard screens.
//!
//! [`App`] drives the loop; the screens themselves are supplied through the
//! [`Screens`] trait so the routing rules run without a terminal.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{AuthProvider, GuardOutcome, Session, SessionGuard};
use crate::config::{Config, DashboardConfig};
use crate::dashboard::{DashboardController, ExitRequest};
use crate::error::Result;
use crate::lifecycle::TransitionPolicy;
use crate::store::TicketStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Splash,
    Login,
    Dashboard,
    Exit,
}

/// Something that can be told to move to another route.
pub trait Navigator {
    fn navigate(&mut self, route: Route);
    fn current(&self) -> Route;
}

/// Records every navigation in order.
#[derive(Debug, Clone)]
pub struct RouteHistory {
    initial: Route,
    navigations: Vec<Route>,
}

impl RouteHistory {
    pub fn new(initial: Route) -> Self {
        Self {
            initial,
            navigations: Vec::new(),
        }
    }

    /// Routes navigated to, excluding the initial one.
    pub fn navigations(&self) -> &[Route] {
        &self.navigations
    }

    /// How many times `route` was navigated to.
    pub fn count(&self, route: Route) -> usize {
        self.navigations.iter().filter(|&&r| r == route).count()
    }
}

impl Navigator for RouteHistory {
    fn navigate(&mut self, route: Route) {
        tracing::debug!(?route, "navigate");
        self.navigations.push(route);
    }

    fn current(&self) -> Route {
        self.navigations.last().copied().unwrap_or(self.initial)
    }
}

/// Result of the login screen.
#[derive(Debug)]
pub enum LoginOutcome {
    SignedIn(Session),
    Cancelled,
}

/// What the dashboard screen needs to run.
pub struct DashboardLaunch {
    pub controller: Arc<DashboardController>,
    pub user_email: String,
    pub poll_interval: Duration,
}

/// The three interactive screens.
///
/// Terminal rendering futures are not `Send`, so neither are these.
#[async_trait::async_trait(?Send)]
pub trait Screens {
    /// Show the splash screen for `hold`.
    async fn splash(&mut self, hold: Duration) -> Result<()>;

    /// Show the credential form until the user signs in or gives up.
    async fn login(&mut self, auth: Arc<dyn AuthProvider>) -> Result<LoginOutcome>;

    /// Run the dashboard until the user quits or logs out.
    async fn dashboard(&mut self, launch: DashboardLaunch) -> Result<ExitRequest>;
}

/// Builds the ticket store once a session is authorized.
///
/// The store is expected to look its token up from the auth provider per
/// request rather than keep the one from this session.
pub type StoreConnector = Box<dyn Fn(&Session) -> Result<Arc<dyn TicketStore>> + Send + Sync>;

pub struct App<S: Screens> {
    auth: Arc<dyn AuthProvider>,
    connect: StoreConnector,
    screens: S,
    settings: DashboardConfig,
    policy: TransitionPolicy,
}

impl<S: Screens> App<S> {
    pub fn new(auth: Arc<dyn AuthProvider>, connect: StoreConnector, screens: S) -> Self {
        Self {
            auth,
            connect,
            screens,
            settings: DashboardConfig::default(),
            policy: TransitionPolicy::default(),
        }
    }

    pub fn with_config(mut self, config: &Config) -> Self {
        self.settings = config.dashboard.clone();
        self.policy = config.transitions;
        self
    }

    pub fn screens(&self) -> &S {
        &self.screens
    }

    /// Run from `start` until a screen asks to exit. Returns the navigation history.
    pub async fn run(&mut self, start: Route) -> Result<RouteHistory> {
        let mut history = RouteHistory::new(start);

        loop {
            match history.current() {
                Route::Splash => {
                    self.screens.splash(self.settings.splash_hold()).await?;
                    let next = match self.auth.get_session().await {
                        Ok(Some(_)) => Route::Dashboard,
                        Ok(None) => Route::Login,
                        Err(e) => {
                            tracing::warn!(error = %e, "session lookup failed on splash");
                            Route::Login
                        }
                    };
                    history.navigate(next);
                }
                Route::Login => match self.screens.login(self.auth.clone()).await? {
                    LoginOutcome::SignedIn(session) => {
                        tracing::info!(email = %session.email, "login complete");
                        history.navigate(Route::Dashboard);
                    }
                    LoginOutcome::Cancelled => history.navigate(Route::Exit),
                },
                Route::Dashboard => {
                    let guard = SessionGuard::new(self.auth.clone());
                    let session = match guard.check(&mut history).await {
                        GuardOutcome::Authorized(session) => session,
                        GuardOutcome::Redirected => continue,
                    };
                    let exit = self.run_dashboard(&session).await?;
                    match exit {
                        ExitRequest::Logout => {
                            if let Err(e) = self.auth.sign_out().await {
                                tracing::warn!(error = %e, "sign-out failed");
                            }
                            history.navigate(Route::Login);
                        }
                        ExitRequest::Quit => history.navigate(Route::Exit),
                    }
                }
                Route::Exit => return Ok(history),
            }
        }
    }

    async fn run_dashboard(&mut self, session: &Session) -> Result<ExitRequest> {
        let store = (self.connect)(session)?;
        let controller = DashboardController::new(store, self.policy)
            .with_refresh_hold(self.settings.refresh_hold());
        let launch = DashboardLaunch {
            controller: Arc::new(controller),
            user_email: session.email.clone(),
            poll_interval: self.settings.poll_interval(),
        };
        self.screens.dashboard(launch).await
    }
}
