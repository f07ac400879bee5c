//! The ticket dashboard core: working set, controller, and background polling.
//!
//! This module is UI-agnostic. The terminal front end in [`crate::tui`] and
//! the one-shot CLI commands both drive a [`DashboardController`].

pub mod controller;
pub mod model;
pub mod poller;

pub use controller::{DEFAULT_REFRESH_HOLD, DashboardController};
pub use model::{DashboardState, ExitRequest, FetchOutcome, PageSummary, TicketStats};
pub use poller::{DEFAULT_POLL_INTERVAL, PollHandle, Poller};
