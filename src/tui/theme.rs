//! Theme system for TUI colors and styles
//!
//! Status colors match the CLI table (see `display`).

use iocraft::prelude::Color;

use crate::types::TicketStatus;

/// Theme configuration for TUI components
#[derive(Debug, Clone)]
pub struct Theme {
    pub status_open: Color,
    pub status_proses: Color,
    pub status_selesai: Color,

    // UI colors
    pub border: Color,
    pub border_focused: Color,
    pub background: Color,
    pub text: Color,
    pub text_dimmed: Color,
    pub highlight: Color,
    pub highlight_text: Color,
    pub code_color: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        let grey = Color::Rgb {
            r: 120,
            g: 120,
            b: 120,
        };
        Self {
            status_open: Color::Red,
            status_proses: Color::Yellow,
            status_selesai: Color::Green,

            border: grey,
            border_focused: Color::Blue,
            background: Color::Reset,
            text: Color::White,
            text_dimmed: grey,
            highlight: Color::Blue,
            highlight_text: Color::White,
            code_color: Color::Cyan,
            error: Color::Red,
        }
    }
}

impl Theme {
    /// Get the color for a ticket status
    pub fn status_color(&self, status: TicketStatus) -> Color {
        match status {
            TicketStatus::Open => self.status_open,
            TicketStatus::Proses => self.status_proses,
            TicketStatus::Selesai => self.status_selesai,
        }
    }
}

/// Global theme instance
pub static THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(Theme::default);

/// Get a reference to the global theme
pub fn theme() -> &'static Theme {
    &THEME
}
