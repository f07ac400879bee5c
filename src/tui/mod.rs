//! Terminal front end built on iocraft
//!
//! Three fullscreen screens (splash, login, dashboard) driven by
//! [`crate::router::App`] through [`TerminalScreens`].

pub mod components;
pub mod dashboard;
pub mod login;
pub mod screens;
pub mod splash;
pub mod theme;

pub use dashboard::{TicketDashboard, TicketDashboardProps};
pub use login::{LoginForm, LoginFormProps, LoginSlot};
pub use screens::TerminalScreens;
pub use splash::{Splash, SplashProps};
