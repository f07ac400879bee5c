pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod logging;
pub mod paths;
pub mod router;
pub mod store;
pub mod tui;
pub mod types;

#[cfg(test)]
mod test_guards;

pub use auth::{AuthProvider, GuardOutcome, MemoryAuth, Session, SessionGuard};
pub use config::Config;
pub use dashboard::{
    DashboardController, DashboardState, ExitRequest, FetchOutcome, PollHandle, Poller,
    TicketStats,
};
pub use error::{HelpdeskError, Result};
pub use lifecycle::{Transition, TransitionPolicy};
pub use router::{App, DashboardLaunch, LoginOutcome, Navigator, Route, RouteHistory, Screens};
pub use store::{MemoryStore, TicketStore};
pub use types::{PAGE_SIZE, Ticket, TicketStatus};
