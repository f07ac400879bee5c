//! Splash screen shown while the stored session is resolved

use std::time::Duration;

use iocraft::prelude::*;

use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct SplashProps {
    /// How long to stay up before exiting
    pub hold: Duration,
}

#[component]
pub fn Splash<'a>(props: &SplashProps, mut hooks: Hooks) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();
    let done = hooks.use_state(|| false);

    hooks.use_future({
        let hold = props.hold;
        let mut done = done;
        async move {
            tokio::time::sleep(hold).await;
            done.set(true);
        }
    });

    hooks.use_terminal_events({
        let mut done = done;
        move |event| {
            if let TerminalEvent::Key(KeyEvent { kind, .. }) = event
                && kind != KeyEventKind::Release
            {
                done.set(true);
            }
        }
    });

    if done.get() {
        system.exit();
    }

    let theme = theme();
    element! {
        View(
            width,
            height,
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            background_color: theme.background,
        ) {
            View(
                border_style: BorderStyle::Round,
                border_color: theme.highlight,
                padding_left: 4,
                padding_right: 4,
                padding_top: 1,
                padding_bottom: 1,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
            ) {
                Text(content: "Helpdesk", color: theme.text, weight: Weight::Bold)
                Text(content: "Ticket dashboard", color: theme.text_dimmed)
            }
            View(margin_top: 1) {
                Text(content: "Checking session...", color: theme.text_dimmed)
            }
        }
    }
}
