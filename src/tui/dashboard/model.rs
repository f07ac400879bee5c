//! Dashboard view model and key mapping
//!
//! Everything here is pure so it can be tested without a terminal. The
//! component in `mod.rs` only wires these functions to iocraft hooks.

use iocraft::prelude::{KeyCode, KeyModifiers};
use jiff::tz::TimeZone;

use crate::dashboard::{DashboardState, PageSummary, TicketStats};
use crate::lifecycle::Transition;
use crate::tui::components::{
    EmptyStateKind, Shortcut, TableRow, compute_empty_state, dashboard_shortcuts,
    detail_shortcuts, empty_dashboard_shortcuts,
};
use crate::types::Ticket;

/// All possible actions on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    MoveDown,
    MoveUp,
    NextPage,
    PrevPage,
    CycleFilter,
    /// Show or hide the full text of the selected ticket
    ToggleDetail,
    /// OPEN -> PROSES on the selected ticket
    Start,
    /// -> SELESAI on the selected ticket
    Complete,
    Refresh,
    CopyCode,
    Logout,
    Quit,
}

impl DashboardAction {
    /// The status change this action requests, if any.
    pub fn transition(self) -> Option<Transition> {
        match self {
            DashboardAction::Start => Some(Transition::Start),
            DashboardAction::Complete => Some(Transition::Complete),
            _ => None,
        }
    }
}

/// Convert a key event to a DashboardAction
///
/// While the detail view is open, `Esc` and `q` close it instead of quitting.
pub fn key_to_action(
    code: KeyCode,
    modifiers: KeyModifiers,
    detail_open: bool,
) -> Option<DashboardAction> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(DashboardAction::Quit),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('v') => Some(DashboardAction::ToggleDetail),
        KeyCode::Char('q') | KeyCode::Esc if detail_open => Some(DashboardAction::ToggleDetail),
        KeyCode::Char('j') | KeyCode::Down => Some(DashboardAction::MoveDown),
        KeyCode::Char('k') | KeyCode::Up => Some(DashboardAction::MoveUp),
        KeyCode::Char('n') | KeyCode::Right => Some(DashboardAction::NextPage),
        KeyCode::Char('p') | KeyCode::Left => Some(DashboardAction::PrevPage),
        KeyCode::Char('f') => Some(DashboardAction::CycleFilter),
        KeyCode::Char('s') => Some(DashboardAction::Start),
        KeyCode::Char('d') | KeyCode::Enter => Some(DashboardAction::Complete),
        KeyCode::Char('r') => Some(DashboardAction::Refresh),
        KeyCode::Char('y') => Some(DashboardAction::CopyCode),
        KeyCode::Char('L') => Some(DashboardAction::Logout),
        KeyCode::Char('q') | KeyCode::Esc => Some(DashboardAction::Quit),
        _ => None,
    }
}

/// Apply the synchronous part of `action` to `state`.
///
/// Returns `false` for actions that need I/O or the terminal, which the
/// component handles itself.
pub fn reduce_dashboard_state(state: &mut DashboardState, action: DashboardAction) -> bool {
    match action {
        DashboardAction::MoveDown => state.select_next(),
        DashboardAction::MoveUp => state.select_prev(),
        DashboardAction::NextPage => state.next_page(),
        DashboardAction::PrevPage => state.prev_page(),
        DashboardAction::CycleFilter => state.cycle_filter(),
        DashboardAction::ToggleDetail => state.toggle_detail(),
        DashboardAction::Start
        | DashboardAction::Complete
        | DashboardAction::Refresh
        | DashboardAction::CopyCode
        | DashboardAction::Logout
        | DashboardAction::Quit => return false,
    }
    true
}

/// Everything the dashboard renders, computed from [`DashboardState`]
#[derive(Debug, Clone)]
pub struct DashboardViewModel {
    pub stats: TicketStats,
    pub rows: Vec<TableRow>,
    pub selected: usize,
    /// The selected ticket while the detail view is open
    pub detail: Option<Ticket>,
    pub summary: PageSummary,
    pub empty_state: Option<EmptyStateKind>,
    /// Label of the active filter, `None` for all statuses
    pub filter_label: Option<String>,
    pub is_refreshing: bool,
    pub is_loading: bool,
    /// Last fetch error, shown while nothing has loaded yet
    pub error_detail: Option<String>,
    pub shortcuts: Vec<Shortcut>,
}

pub fn compute_view_model(state: &DashboardState, tz: &TimeZone) -> DashboardViewModel {
    let visible = state.visible_slice();
    let rows: Vec<TableRow> = visible
        .iter()
        .map(|ticket| TableRow::from_ticket(ticket, tz))
        .collect();

    let empty_state = compute_empty_state(
        state.loaded,
        state.last_error.is_some(),
        state.tickets.len(),
        state.filtered_len(),
    );

    let detail = if state.detail_open {
        state.selected_ticket().cloned()
    } else {
        None
    };

    let shortcuts = if empty_state.is_some() {
        empty_dashboard_shortcuts()
    } else if detail.is_some() {
        detail_shortcuts()
    } else {
        dashboard_shortcuts()
    };

    DashboardViewModel {
        stats: state.stats(),
        rows,
        selected: state.selected_row,
        detail,
        summary: state.page_summary(),
        empty_state,
        filter_label: state.status_filter.map(|s| s.label().to_string()),
        is_refreshing: state.is_refreshing,
        is_loading: state.is_loading() && !state.is_refreshing,
        error_detail: if state.loaded {
            None
        } else {
            state.last_error.clone()
        },
        shortcuts,
    }
}
