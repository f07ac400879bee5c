//! Dashboard state and the pure functions that derive views from it.
//!
//! Nothing here performs I/O. [`super::DashboardController`] owns a
//! [`DashboardState`] and mutates it in response to fetches and user actions;
//! the terminal UI and the CLI only read derived values.

use std::fmt;

use crate::types::{PAGE_SIZE, Ticket, TicketStatus};

/// Why the dashboard is closing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitRequest {
    Quit,
    Logout,
}

/// Whether a completed fetch replaced the working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// A fetch issued later has already been applied.
    Stale,
    /// The fetch failed; the working set is unchanged.
    Failed,
}

/// Counts over the whole working set, regardless of filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub process: usize,
    pub done: usize,
}

impl TicketStats {
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        let mut stats = TicketStats {
            total: tickets.len(),
            ..Default::default()
        };
        for ticket in tickets {
            match ticket.status {
                TicketStatus::Open => stats.open += 1,
                TicketStatus::Proses => stats.process += 1,
                TicketStatus::Selesai => stats.done += 1,
            }
        }
        stats
    }

    pub fn count(&self, status: TicketStatus) -> usize {
        match status {
            TicketStatus::Open => self.open,
            TicketStatus::Proses => self.process,
            TicketStatus::Selesai => self.done,
        }
    }
}

/// The "Showing a-b of n" line under the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    pub first: usize,
    pub last: usize,
    pub total: usize,
    pub page: usize,
    pub page_count: usize,
}

impl PageSummary {
    pub fn range_text(&self) -> String {
        format!("Showing {}-{} of {} tickets", self.first, self.last, self.total)
    }

    pub fn page_text(&self) -> String {
        format!("Page {}/{}", self.page, self.page_count)
    }
}

impl fmt::Display for PageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  ·  {}", self.range_text(), self.page_text())
    }
}

/// Everything the dashboard knows.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Working set, newest first. A cache of the backend table.
    pub tickets: Vec<Ticket>,
    /// 1-based page into the filtered list.
    pub current_page: usize,
    pub status_filter: Option<TicketStatus>,
    /// Row index within the visible page.
    pub selected_row: usize,
    /// Whether the selected ticket is shown in full.
    pub detail_open: bool,

    /// Highest fetch sequence number applied so far.
    pub applied_seq: u64,
    /// Fetches started but not yet completed.
    pub in_flight: usize,
    /// Whether any fetch has been applied yet.
    pub loaded: bool,
    /// Manual refresh indicator.
    pub is_refreshing: bool,
    pub last_error: Option<String>,

    pub exit: Option<ExitRequest>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            tickets: Vec::new(),
            current_page: 1,
            status_filter: None,
            selected_row: 0,
            detail_open: false,
            applied_seq: 0,
            in_flight: 0,
            loaded: false,
            is_refreshing: false,
            last_error: None,
            exit: None,
        }
    }
}

impl DashboardState {
    pub fn with_tickets(tickets: Vec<Ticket>) -> Self {
        Self {
            tickets,
            loaded: true,
            ..Default::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn stats(&self) -> TicketStats {
        TicketStats::from_tickets(&self.tickets)
    }

    /// Tickets passing the status filter, in working-set order.
    pub fn filtered(&self) -> Vec<&Ticket> {
        self.tickets
            .iter()
            .filter(|t| self.status_filter.is_none_or(|s| t.status == s))
            .collect()
    }

    pub fn filtered_len(&self) -> usize {
        match self.status_filter {
            None => self.tickets.len(),
            Some(status) => self.tickets.iter().filter(|t| t.status == status).count(),
        }
    }

    /// `ceil(filtered / PAGE_SIZE)`; zero when there is nothing to show.
    pub fn total_pages(&self) -> usize {
        self.filtered_len().div_ceil(PAGE_SIZE)
    }

    /// Highest page the cursor may point at.
    pub fn last_page(&self) -> usize {
        self.total_pages().max(1)
    }

    /// The tickets on `current_page`, at most [`PAGE_SIZE`].
    pub fn visible_slice(&self) -> Vec<&Ticket> {
        let start = (self.current_page - 1) * PAGE_SIZE;
        self.filtered().into_iter().skip(start).take(PAGE_SIZE).collect()
    }

    pub fn selected_ticket(&self) -> Option<&Ticket> {
        self.visible_slice().get(self.selected_row).copied()
    }

    pub fn find(&self, key: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.matches_key(key))
    }

    pub fn page_summary(&self) -> PageSummary {
        let total = self.filtered_len();
        let start = (self.current_page - 1) * PAGE_SIZE;
        let shown = self.visible_slice().len();
        let (first, last) = if shown == 0 {
            (0, 0)
        } else {
            (start + 1, start + shown)
        };
        PageSummary {
            first,
            last,
            total,
            page: self.current_page,
            page_count: self.last_page(),
        }
    }

    /// Advance one page. No-op on the last page.
    pub fn next_page(&mut self) {
        if self.current_page < self.last_page() {
            self.current_page += 1;
            self.selected_row = 0;
        }
    }

    /// Go back one page. No-op on the first page.
    pub fn prev_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
            self.selected_row = 0;
        }
    }

    /// Jump to `page`, clamped into range.
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page;
        self.selected_row = 0;
        self.reclamp();
    }

    pub fn select_next(&mut self) {
        let len = self.visible_slice().len();
        if self.selected_row + 1 < len {
            self.selected_row += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn set_filter(&mut self, filter: Option<TicketStatus>) {
        if self.status_filter != filter {
            self.status_filter = filter;
            self.current_page = 1;
            self.selected_row = 0;
        }
        self.reclamp();
    }

    /// All -> OPEN -> PROSES -> SELESAI -> All.
    pub fn cycle_filter(&mut self) {
        let next = match self.status_filter {
            None => Some(TicketStatus::Open),
            Some(TicketStatus::Open) => Some(TicketStatus::Proses),
            Some(TicketStatus::Proses) => Some(TicketStatus::Selesai),
            Some(TicketStatus::Selesai) => None,
        };
        self.set_filter(next);
    }

    /// Open or close the detail view. Stays closed when no ticket is selected.
    pub fn toggle_detail(&mut self) {
        self.detail_open = !self.detail_open && self.selected_ticket().is_some();
    }

    /// Pull the page and row cursors back inside the current data.
    pub fn reclamp(&mut self) {
        self.current_page = self.current_page.clamp(1, self.last_page());
        let rows = self.visible_slice().len();
        self.selected_row = self.selected_row.min(rows.saturating_sub(1));
        if rows == 0 {
            self.detail_open = false;
        }
    }

    /// Record that fetch `seq` has been issued.
    pub fn begin_fetch(&mut self) {
        self.in_flight += 1;
    }

    /// Apply the result of fetch `seq`.
    ///
    /// Results older than the newest applied one are dropped, so the list
    /// always reflects the most recently issued fetch that succeeded.
    pub fn apply_fetch(
        &mut self,
        seq: u64,
        result: std::result::Result<Vec<Ticket>, String>,
    ) -> FetchOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);
        if seq <= self.applied_seq {
            return FetchOutcome::Stale;
        }
        match result {
            Ok(tickets) => {
                self.tickets = tickets;
                self.applied_seq = seq;
                self.loaded = true;
                self.last_error = None;
                self.reclamp();
                FetchOutcome::Applied
            }
            Err(message) => {
                self.last_error = Some(message);
                FetchOutcome::Failed
            }
        }
    }

    /// Rewrite one ticket's status in place, returning the previous status.
    pub fn set_local_status(&mut self, id: i64, status: TicketStatus) -> Option<TicketStatus> {
        let ticket = self.tickets.iter_mut().find(|t| t.id == id)?;
        let previous = ticket.status;
        ticket.status = status;
        self.reclamp();
        Some(previous)
    }

    /// Rewrite one ticket's status as of fetch sequence `seq`.
    ///
    /// Fetches issued before `seq` are discarded when they land, so a poll
    /// already in flight cannot undo the change.
    pub fn apply_local_status(
        &mut self,
        seq: u64,
        id: i64,
        status: TicketStatus,
    ) -> Option<TicketStatus> {
        let previous = self.set_local_status(id, status)?;
        self.applied_seq = self.applied_seq.max(seq);
        Some(previous)
    }
}
