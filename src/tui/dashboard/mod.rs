//! Ticket dashboard screen
//!
//! Mirrors the [`DashboardController`] state into iocraft state and keeps a
//! [`Poller`] running for as long as the component is mounted. Unmounting
//! drops the poll handle, which stops the background fetches.

pub mod model;

use std::sync::Arc;
use std::time::{Duration, Instant};

use clipboard_rs::Clipboard;
use iocraft::prelude::*;
use jiff::tz::TimeZone;

pub use model::{
    DashboardAction, DashboardViewModel, compute_view_model, key_to_action,
    reduce_dashboard_state,
};

use crate::dashboard::{
    DEFAULT_POLL_INTERVAL, DashboardController, DashboardState, ExitRequest, Poller,
};
use crate::lifecycle::Transition;
use crate::tui::components::{
    EmptyState, Footer, Header, Pagination, StatsBar, TicketDetail, TicketTable, Toast,
    render_toast,
};
use crate::tui::theme::theme;

/// How often an expired toast is looked for
const TOAST_SWEEP: Duration = Duration::from_millis(250);

#[derive(Default, Props)]
pub struct TicketDashboardProps {
    pub controller: Option<Arc<DashboardController>>,
    pub user_email: Option<String>,
    pub poll_interval: Option<Duration>,
}

#[component]
pub fn TicketDashboard<'a>(
    props: &TicketDashboardProps,
    mut hooks: Hooks,
) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();

    let snapshot = hooks.use_state(DashboardState::default);
    let toast: State<Option<Toast>> = hooks.use_state(|| None);
    let should_exit = hooks.use_state(|| false);

    hooks.use_future({
        let controller = props.controller.clone();
        let interval = props.poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL);
        let mut snapshot = snapshot;
        async move {
            let Some(controller) = controller else {
                return;
            };
            let _poller = Poller::start(controller.clone(), interval);
            let mut updates = controller.subscribe();
            loop {
                let next = updates.borrow_and_update().clone();
                snapshot.set(next);
                if updates.changed().await.is_err() {
                    break;
                }
            }
        }
    });

    hooks.use_future({
        let mut toast = toast;
        async move {
            loop {
                tokio::time::sleep(TOAST_SWEEP).await;
                let expired = toast
                    .read()
                    .as_ref()
                    .is_some_and(|t| t.is_expired_at(Instant::now()));
                if expired {
                    toast.set(None);
                }
            }
        }
    });

    let status_handler: Handler<Transition> = hooks.use_async_handler({
        let controller = props.controller.clone();
        move |transition: Transition| {
            let controller = controller.clone();
            let mut toast = toast;
            async move {
                let Some(controller) = controller else {
                    return;
                };
                let code = controller
                    .snapshot()
                    .selected_ticket()
                    .map(|t| t.ticket_code.clone());
                match controller.update_selected(transition).await {
                    Ok(status) => {
                        if let Some(code) = code {
                            toast.set(Some(Toast::success(format!(
                                "{} -> {}",
                                code,
                                status.label()
                            ))));
                        }
                    }
                    Err(e) => toast.set(Some(Toast::from_error(&e))),
                }
            }
        }
    });

    let refresh_handler: Handler<()> = hooks.use_async_handler({
        let controller = props.controller.clone();
        move |()| {
            let controller = controller.clone();
            let mut toast = toast;
            async move {
                let Some(controller) = controller else {
                    return;
                };
                match controller.manual_refresh().await {
                    Ok(_) => toast.set(Some(Toast::info("Tickets refreshed"))),
                    Err(e) => toast.set(Some(Toast::from_error(&e))),
                }
            }
        }
    });

    hooks.use_terminal_events({
        let controller = props.controller.clone();
        let mut toast = toast;
        let mut should_exit = should_exit;
        move |event| match event {
            TerminalEvent::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) if kind != KeyEventKind::Release => {
                let Some(controller) = controller.as_ref() else {
                    should_exit.set(true);
                    return;
                };
                let detail_open = controller.snapshot().detail_open;
                let Some(action) = key_to_action(code, modifiers, detail_open) else {
                    return;
                };

                if let Some(transition) = action.transition() {
                    status_handler(transition);
                    return;
                }

                match action {
                    DashboardAction::Refresh => refresh_handler(()),
                    DashboardAction::CopyCode => {
                        let code = controller
                            .snapshot()
                            .selected_ticket()
                            .map(|t| t.ticket_code.clone());
                        if let Some(code) = code {
                            let copied = clipboard_rs::ClipboardContext::new()
                                .and_then(|ctx| ctx.set_text(code.clone()));
                            toast.set(Some(match copied {
                                Ok(()) => Toast::info(format!("Copied {}", code)),
                                Err(_) => Toast::warning("Clipboard unavailable"),
                            }));
                        }
                    }
                    DashboardAction::Logout => {
                        controller.update(|state| state.exit = Some(ExitRequest::Logout));
                        should_exit.set(true);
                    }
                    DashboardAction::Quit => {
                        controller.update(|state| state.exit = Some(ExitRequest::Quit));
                        should_exit.set(true);
                    }
                    _ => controller.update(|state| {
                        reduce_dashboard_state(state, action);
                    }),
                }
            }
            _ => {}
        }
    });

    if should_exit.get() {
        system.exit();
    }

    let theme = theme();
    let vm = compute_view_model(&snapshot.read(), &TimeZone::system());
    let current_toast = toast.read().clone();

    element! {
        View(
            width,
            height,
            flex_direction: FlexDirection::Column,
            background_color: theme.background,
        ) {
            Header(
                user: props.user_email.clone(),
                filter: vm.filter_label.clone(),
                refreshing: vm.is_refreshing,
                loading: vm.is_loading,
            )
            View(padding_left: 1, padding_right: 1, flex_shrink: 0.0) {
                StatsBar(stats: vm.stats)
            }
            View(
                flex_grow: 1.0,
                flex_direction: FlexDirection::Column,
                padding_left: 1,
                padding_right: 1,
            ) {
                #(vm.empty_state.map(|kind| element! {
                    EmptyState(kind: kind, detail: vm.error_detail.clone())
                }))
                #(vm.empty_state.is_none().then(|| match vm.detail.clone() {
                    Some(ticket) => element! {
                        TicketDetail(ticket: ticket)
                    }
                    .into_any(),
                    None => element! {
                        TicketTable(rows: vm.rows.clone(), selected: vm.selected)
                    }
                    .into_any(),
                }))
            }
            Pagination(summary: vm.summary)
            #(render_toast(&current_toast))
            Footer(shortcuts: vm.shortcuts.clone())
        }
    }
}
