//! Keyboard shortcuts bar component
//!
//! Displays available keyboard shortcuts at the bottom of the screen.

use iocraft::prelude::*;

use super::shortcuts::ShortcutsBuilder;
use crate::tui::theme::theme;

/// A single keyboard shortcut entry
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// The key or key combination (e.g., "q", "Tab")
    pub key: String,
    /// Description of the action (e.g., "Quit", "Next field")
    pub action: String,
}

impl Shortcut {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Props for the Footer component
#[derive(Default, Props)]
pub struct FooterProps {
    pub shortcuts: Vec<Shortcut>,
}

/// Keyboard shortcuts bar at the bottom of the screen
#[component]
pub fn Footer(props: &FooterProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    element! {
        View(
            width: 100pct,
            min_height: 1,
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Wrap,
            flex_shrink: 0.0,
            padding_left: 1,
            padding_right: 1,
            column_gap: 2,
            background_color: theme.border,
        ) {
            #(props.shortcuts.iter().map(|shortcut| {
                let key = shortcut.key.clone();
                let action = shortcut.action.clone();
                element! {
                    View(flex_direction: FlexDirection::Row) {
                        Text(
                            content: format!("[{}]", key),
                            color: theme.highlight,
                            weight: Weight::Bold,
                        )
                        Text(
                            content: format!(" {}", action),
                            color: theme.text,
                        )
                    }
                }
            }))
        }
    }
}

/// Shortcuts for the ticket dashboard
pub fn dashboard_shortcuts() -> Vec<Shortcut> {
    ShortcutsBuilder::new()
        .with_navigation()
        .with_status_actions()
        .add("v", "Details")
        .add("f", "Filter")
        .add("r", "Refresh")
        .add("y", "Copy Code")
        .add("L", "Log Out")
        .with_quit()
        .build()
}

/// Shortcuts while the selected ticket is shown in full
pub fn detail_shortcuts() -> Vec<Shortcut> {
    ShortcutsBuilder::new()
        .with_navigation()
        .with_status_actions()
        .add("y", "Copy Code")
        .add("Esc", "Close")
        .build()
}

/// Shortcuts for the dashboard while nothing is listed
pub fn empty_dashboard_shortcuts() -> Vec<Shortcut> {
    ShortcutsBuilder::new()
        .add("f", "Filter")
        .add("r", "Refresh")
        .add("L", "Log Out")
        .with_quit()
        .build()
}

/// Shortcuts for the login form
pub fn login_shortcuts() -> Vec<Shortcut> {
    ShortcutsBuilder::new()
        .add("Tab", "Next Field")
        .add("Enter", "Sign In")
        .add("Esc", "Quit")
        .build()
}
