//! Declarative builder for TUI shortcuts

use super::Shortcut;

/// Builder for shortcut lists with the common groups
#[derive(Default)]
pub struct ShortcutsBuilder {
    shortcuts: Vec<Shortcut>,
}

impl ShortcutsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row selection and page movement
    pub fn with_navigation(mut self) -> Self {
        self.shortcuts.push(Shortcut::new("j/k", "Up/Down"));
        self.shortcuts.push(Shortcut::new("n/p", "Next/Prev Page"));
        self
    }

    /// Status changes on the selected ticket
    pub fn with_status_actions(mut self) -> Self {
        self.shortcuts.push(Shortcut::new("s", "Start"));
        self.shortcuts.push(Shortcut::new("d", "Done"));
        self
    }

    pub fn with_quit(mut self) -> Self {
        self.shortcuts.push(Shortcut::new("q", "Quit"));
        self
    }

    /// Add a single custom shortcut
    pub fn add(mut self, key: &str, description: &str) -> Self {
        self.shortcuts.push(Shortcut::new(key, description));
        self
    }

    pub fn build(self) -> Vec<Shortcut> {
        self.shortcuts
    }
}
