//! Shared TUI components

pub mod empty_state;
pub mod footer;
pub mod header;
pub mod pagination;
pub mod shortcuts;
pub mod stats_bar;
pub mod ticket_detail;
pub mod ticket_table;
pub mod toast;

pub use empty_state::{EmptyState, EmptyStateKind, EmptyStateProps, compute_empty_state};
pub use footer::{
    Footer, FooterProps, Shortcut, dashboard_shortcuts, detail_shortcuts,
    empty_dashboard_shortcuts, login_shortcuts,
};
pub use header::{Header, HeaderProps};
pub use pagination::{Pagination, PaginationProps};
pub use stats_bar::{StatsBar, StatsBarProps};
pub use ticket_detail::{TicketDetail, TicketDetailProps};
pub use ticket_table::{TableRow, TicketTable, TicketTableProps, TicketTableRow};
pub use toast::{Toast, ToastLevel, render_toast};
