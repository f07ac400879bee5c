use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use super::model::{DashboardState, FetchOutcome};
use crate::error::{HelpdeskError, Result};
use crate::lifecycle::{Transition, TransitionPolicy};
use crate::store::TicketStore;
use crate::types::TicketStatus;

/// Default minimum visibility of the manual refresh indicator.
pub const DEFAULT_REFRESH_HOLD: Duration = Duration::from_millis(800);

/// Owns the working set and every operation that changes it.
///
/// State is published through a [`watch`] channel. Each mutation goes through
/// `send_modify`, so subscribers never observe a half-applied change.
pub struct DashboardController {
    store: Arc<dyn TicketStore>,
    policy: TransitionPolicy,
    refresh_hold: Duration,
    next_seq: AtomicU64,
    state: watch::Sender<DashboardState>,
}

impl DashboardController {
    pub fn new(store: Arc<dyn TicketStore>, policy: TransitionPolicy) -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        Self {
            store,
            policy,
            refresh_hold: DEFAULT_REFRESH_HOLD,
            next_seq: AtomicU64::new(0),
            state,
        }
    }

    pub fn with_refresh_hold(mut self, hold: Duration) -> Self {
        self.refresh_hold = hold;
        self
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    /// Apply a synchronous change such as page or selection movement.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut DashboardState),
    {
        self.state.send_modify(f);
    }

    /// Fetch the full ticket list and apply it unless a later-issued fetch
    /// has already landed.
    ///
    /// On failure the working set is left alone and the error is both
    /// recorded in `last_error` and returned.
    pub async fn refresh(&self) -> Result<FetchOutcome> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(DashboardState::begin_fetch);

        let (result, error) = match self.store.list_tickets().await {
            Ok(tickets) => (Ok(tickets), None),
            Err(e) => (Err(e.to_string()), Some(e)),
        };

        let mut outcome = FetchOutcome::Stale;
        self.state
            .send_modify(|state| outcome = state.apply_fetch(seq, result));

        match outcome {
            FetchOutcome::Applied => tracing::debug!(seq, "fetch applied"),
            FetchOutcome::Stale => tracing::debug!(seq, "discarded stale fetch"),
            FetchOutcome::Failed => tracing::warn!(seq, "fetch failed, keeping previous tickets"),
        }

        match error {
            Some(e) => Err(e),
            None => Ok(outcome),
        }
    }

    /// User-triggered refresh: back to page 1, indicator on for at least the
    /// configured hold measured from the start.
    pub async fn manual_refresh(&self) -> Result<FetchOutcome> {
        let started = Instant::now();
        self.state.send_modify(|state| {
            state.is_refreshing = true;
            state.go_to_page(1);
        });

        let result = self.refresh().await;

        let elapsed = started.elapsed();
        if elapsed < self.refresh_hold {
            tokio::time::sleep(self.refresh_hold - elapsed).await;
        }
        self.state.send_modify(|state| state.is_refreshing = false);
        result
    }

    /// Change a ticket's status: validate, apply locally, then write through.
    ///
    /// The local change takes a fetch sequence number, so polls issued before
    /// it are discarded. If the write fails the whole list is re-fetched so the
    /// view matches the backend again, and the write error is returned. Requesting the status a
    /// ticket already has is a no-op that skips the backend.
    pub async fn update_status(&self, id: i64, transition: Transition) -> Result<TicketStatus> {
        let current = self
            .state
            .borrow()
            .tickets
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.status)
            .ok_or_else(|| HelpdeskError::TicketNotFound(id.to_string()))?;

        let target = self.policy.resolve(current, transition)?;
        if target == current {
            return Ok(current);
        }

        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|state| {
            state.apply_local_status(seq, id, target);
        });

        if let Err(e) = self.store.set_status(id, target).await {
            tracing::warn!(id, %target, error = %e, "status update failed, reconciling");
            if let Err(refresh_err) = self.refresh().await {
                tracing::warn!(error = %refresh_err, "reconciling fetch failed");
            }
            return Err(e);
        }

        tracing::info!(id, from = %current, to = %target, "status updated");
        Ok(target)
    }

    /// Apply `transition` to the ticket under the cursor.
    pub async fn update_selected(&self, transition: Transition) -> Result<TicketStatus> {
        let id = self
            .state
            .borrow()
            .selected_ticket()
            .map(|t| t.id)
            .ok_or_else(|| HelpdeskError::Other("no ticket selected".into()))?;
        self.update_status(id, transition).await
    }
}
