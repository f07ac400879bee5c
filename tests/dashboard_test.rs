mod common;

use std::sync::Arc;
use std::time::Duration;

use common::fixtures::{open_tickets, ticket};
use helpdesk::{
    DashboardController, FetchOutcome, HelpdeskError, MemoryStore, PAGE_SIZE, Poller,
    TicketStatus, Transition, TransitionPolicy,
};

fn controller(store: &Arc<MemoryStore>) -> Arc<DashboardController> {
    Arc::new(DashboardController::new(
        store.clone(),
        TransitionPolicy::ForwardOnly,
    ))
}

fn ids(controller: &DashboardController) -> Vec<i64> {
    controller.snapshot().tickets.iter().map(|t| t.id).collect()
}

#[tokio::test]
async fn test_complete_updates_locally_and_writes_once() {
    let store = Arc::new(MemoryStore::new(vec![
        ticket(1, TicketStatus::Open, 1),
        ticket(2, TicketStatus::Proses, 2),
    ]));
    let controller = controller(&store);
    controller.refresh().await.unwrap();

    let status = controller
        .update_status(1, Transition::Complete)
        .await
        .unwrap();

    assert_eq!(status, TicketStatus::Selesai);
    let state = controller.snapshot();
    assert_eq!(state.find("1").unwrap().status, TicketStatus::Selesai);
    assert_eq!(state.find("2").unwrap().status, TicketStatus::Proses);
    assert_eq!(store.updates(), vec![(1, TicketStatus::Selesai)]);
}

#[tokio::test]
async fn test_twenty_five_tickets_make_three_pages() {
    let store = Arc::new(MemoryStore::new(open_tickets(25)));
    let controller = controller(&store);
    controller.refresh().await.unwrap();

    let mut state = controller.snapshot();
    assert_eq!(state.total_pages(), 3);

    state.prev_page();
    assert_eq!(state.current_page, 1);

    let mut seen = Vec::new();
    loop {
        let page: Vec<i64> = state.visible_slice().iter().map(|t| t.id).collect();
        assert!(page.len() <= PAGE_SIZE);
        seen.extend(page);
        if state.current_page == state.total_pages() {
            break;
        }
        state.next_page();
    }
    assert_eq!(state.current_page, 3);
    assert_eq!(state.visible_slice().len(), 5);

    state.next_page();
    assert_eq!(state.current_page, 3);
    assert_eq!(seen, ids(&controller));
}

#[tokio::test]
async fn test_stats_add_up() {
    let store = Arc::new(MemoryStore::new(vec![
        ticket(1, TicketStatus::Open, 1),
        ticket(2, TicketStatus::Proses, 2),
        ticket(3, TicketStatus::Selesai, 3),
        ticket(4, TicketStatus::Selesai, 4),
    ]));
    let controller = controller(&store);
    controller.refresh().await.unwrap();

    let stats = controller.snapshot().stats();
    assert_eq!((stats.open, stats.process, stats.done), (1, 1, 2));
    assert_eq!(stats.open + stats.process + stats.done, stats.total);
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_list() {
    let store = Arc::new(MemoryStore::new(open_tickets(4)));
    let controller = controller(&store);
    controller.refresh().await.unwrap();

    store.replace_all(open_tickets(9));
    store.fail_next_lists(1);
    let result = controller.refresh().await;

    assert!(matches!(result, Err(HelpdeskError::Api(_))));
    let state = controller.snapshot();
    assert_eq!(state.tickets.len(), 4);
    assert!(state.last_error.is_some());
    assert!(!state.is_loading());

    controller.update(|state| state.select_next());
    assert_eq!(controller.snapshot().selected_row, 1);
}

#[tokio::test(start_paused = true)]
async fn test_earlier_fetch_finishing_later_is_discarded() {
    let store = Arc::new(MemoryStore::new(open_tickets(3)));
    let controller = controller(&store);

    store.delay_next_list(Duration::from_millis(500));
    let slow = tokio::spawn({
        let controller = controller.clone();
        async move { controller.refresh().await }
    });
    // Let the slow fetch take its snapshot before the data changes.
    tokio::time::sleep(Duration::from_millis(1)).await;

    store.replace_all(open_tickets(7));
    let fast = controller.refresh().await.unwrap();
    assert_eq!(fast, FetchOutcome::Applied);

    let slow = slow.await.unwrap().unwrap();
    assert_eq!(slow, FetchOutcome::Stale);
    assert_eq!(controller.snapshot().tickets.len(), 7);
    assert_eq!(controller.snapshot().applied_seq, 2);
}

#[tokio::test(start_paused = true)]
async fn test_poll_in_flight_does_not_undo_local_update() {
    let store = Arc::new(MemoryStore::new(vec![ticket(1, TicketStatus::Open, 5)]));
    let controller = controller(&store);
    controller.refresh().await.unwrap();

    store.delay_next_list(Duration::from_millis(500));
    let poll = tokio::spawn({
        let controller = controller.clone();
        async move { controller.refresh().await }
    });
    tokio::time::sleep(Duration::from_millis(1)).await;

    controller
        .update_status(1, Transition::Complete)
        .await
        .unwrap();
    assert_eq!(poll.await.unwrap().unwrap(), FetchOutcome::Stale);
    assert_eq!(controller.snapshot().tickets[0].status, TicketStatus::Selesai);

    assert_eq!(controller.refresh().await.unwrap(), FetchOutcome::Applied);
    assert_eq!(controller.snapshot().tickets[0].status, TicketStatus::Selesai);
}

#[tokio::test]
async fn test_failed_update_reconciles_with_one_list_call() {
    let store = Arc::new(MemoryStore::new(vec![
        ticket(1, TicketStatus::Open, 1),
        ticket(2, TicketStatus::Open, 2),
    ]));
    let controller = controller(&store);
    controller.refresh().await.unwrap();
    let lists_before = store.list_calls();

    // Another operator started ticket 2 meanwhile.
    store.replace_all(vec![
        ticket(1, TicketStatus::Open, 1),
        ticket(2, TicketStatus::Proses, 2),
    ]);
    store.fail_next_updates(1);

    let result = controller.update_status(1, Transition::Start).await;

    assert!(result.is_err());
    assert_eq!(store.list_calls(), lists_before + 1);
    let statuses: Vec<TicketStatus> = controller
        .snapshot()
        .tickets
        .iter()
        .map(|t| t.status)
        .collect();
    assert_eq!(statuses, vec![TicketStatus::Open, TicketStatus::Proses]);
}

#[tokio::test]
async fn test_set_status_twice_is_idempotent() {
    let store = Arc::new(MemoryStore::new(open_tickets(1)));
    let controller = controller(&store);
    controller.refresh().await.unwrap();

    let target = Transition::SetStatus(TicketStatus::Proses);
    controller.update_status(1, target).await.unwrap();
    controller.update_status(1, target).await.unwrap();

    assert_eq!(store.status_of(1), Some(TicketStatus::Proses));
    assert_eq!(controller.snapshot().tickets[0].status, TicketStatus::Proses);
    assert_eq!(store.updates().len(), 1);
}

#[tokio::test]
async fn test_forward_only_rejects_reopen() {
    let store = Arc::new(MemoryStore::new(vec![ticket(1, TicketStatus::Selesai, 1)]));
    let controller = controller(&store);
    controller.refresh().await.unwrap();

    let result = controller
        .update_status(1, Transition::SetStatus(TicketStatus::Open))
        .await;

    assert!(matches!(
        result,
        Err(HelpdeskError::InvalidTransition { .. })
    ));
    assert!(store.updates().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_poll_handle_stops_fetches() {
    let store = Arc::new(MemoryStore::new(open_tickets(2)));
    let controller = controller(&store);

    let handle = Poller::start(controller.clone(), Duration::from_secs(30));
    tokio::time::sleep(Duration::from_secs(61)).await;
    assert_eq!(store.list_calls(), 3);

    drop(handle);
    tokio::time::sleep(Duration::from_secs(300)).await;
    assert_eq!(store.list_calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_filter_survives_polling() {
    let store = Arc::new(MemoryStore::new(vec![
        ticket(1, TicketStatus::Open, 1),
        ticket(2, TicketStatus::Proses, 2),
    ]));
    let controller = controller(&store);
    let _handle = Poller::start(controller.clone(), Duration::from_secs(30));
    tokio::time::sleep(Duration::from_millis(10)).await;

    controller.update(|state| state.set_filter(Some(TicketStatus::Proses)));
    store.replace_all(vec![
        ticket(1, TicketStatus::Proses, 1),
        ticket(2, TicketStatus::Proses, 2),
        ticket(3, TicketStatus::Open, 3),
    ]);
    tokio::time::sleep(Duration::from_secs(30)).await;

    let state = controller.snapshot();
    assert_eq!(state.status_filter, Some(TicketStatus::Proses));
    assert_eq!(state.filtered_len(), 2);
    assert_eq!(state.stats().total, 3);
}
