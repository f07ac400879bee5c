use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use super::TicketStore;
use crate::error::{HelpdeskError, Result};
use crate::types::{Ticket, TicketStatus, sort_newest_first};

/// In-process ticket table.
///
/// Records every `set_status` call and supports per-call failure and latency
/// injection so controller behavior can be exercised deterministically.
#[derive(Default)]
pub struct MemoryStore {
    tickets: Mutex<Vec<Ticket>>,
    updates: Mutex<Vec<(i64, TicketStatus)>>,
    list_delays: Mutex<VecDeque<Duration>>,
    list_calls: AtomicUsize,
    failing_lists: AtomicUsize,
    failing_updates: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl MemoryStore {
    pub fn new(tickets: Vec<Ticket>) -> Self {
        let store = Self::default();
        store.replace_all(tickets);
        store
    }

    /// Replace the backend contents, as if another client edited the table.
    pub fn replace_all(&self, mut tickets: Vec<Ticket>) {
        sort_newest_first(&mut tickets);
        *lock(&self.tickets) = tickets;
    }

    pub fn tickets(&self) -> Vec<Ticket> {
        lock(&self.tickets).clone()
    }

    pub fn status_of(&self, id: i64) -> Option<TicketStatus> {
        lock(&self.tickets)
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.status)
    }

    /// Every successful or failed `set_status` call, in order.
    pub fn updates(&self) -> Vec<(i64, TicketStatus)> {
        lock(&self.updates).clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Fail the next `n` list calls.
    pub fn fail_next_lists(&self, n: usize) {
        self.failing_lists.store(n, Ordering::SeqCst);
    }

    /// Fail the next `n` update calls.
    pub fn fail_next_updates(&self, n: usize) {
        self.failing_updates.store(n, Ordering::SeqCst);
    }

    /// Delay the next list call by `delay`. Queued delays apply in call order.
    pub fn delay_next_list(&self, delay: Duration) {
        lock(&self.list_delays).push_back(delay);
    }

    fn take_failure(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait::async_trait]
impl TicketStore for MemoryStore {
    async fn list_tickets(&self) -> Result<Vec<Ticket>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        // Snapshot at call time so a delayed response carries older data.
        let snapshot = self.tickets();
        let failed = Self::take_failure(&self.failing_lists);
        let delay = lock(&self.list_delays).pop_front();

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if failed {
            return Err(HelpdeskError::Api("simulated list failure".into()));
        }
        Ok(snapshot)
    }

    async fn set_status(&self, id: i64, status: TicketStatus) -> Result<()> {
        lock(&self.updates).push((id, status));
        if Self::take_failure(&self.failing_updates) {
            return Err(HelpdeskError::Api("simulated update failure".into()));
        }

        let mut tickets = lock(&self.tickets);
        let ticket = tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| HelpdeskError::TicketNotFound(id.to_string()))?;
        ticket.status = status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;

    fn ticket(id: i64, status: TicketStatus) -> Ticket {
        Ticket {
            id,
            ticket_code: format!("TKT-{id:04}"),
            sender_name: None,
            phone_number: String::new(),
            division: None,
            issue_details: String::new(),
            status,
            created_at: Timestamp::from_second(1_700_000_000 + id).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_lists_newest_first() {
        let store = MemoryStore::new(vec![ticket(1, TicketStatus::Open), ticket(2, TicketStatus::Open)]);
        let ids: Vec<i64> = store.list_tickets().await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(store.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_injection_is_consumed() {
        let store = MemoryStore::new(vec![ticket(1, TicketStatus::Open)]);
        store.fail_next_updates(1);
        assert!(store.set_status(1, TicketStatus::Proses).await.is_err());
        assert_eq!(store.status_of(1), Some(TicketStatus::Open));
        store.set_status(1, TicketStatus::Proses).await.unwrap();
        assert_eq!(store.status_of(1), Some(TicketStatus::Proses));
        assert_eq!(store.updates().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let store = MemoryStore::new(vec![]);
        assert!(matches!(
            store.set_status(9, TicketStatus::Selesai).await,
            Err(HelpdeskError::TicketNotFound(_))
        ));
    }
}
