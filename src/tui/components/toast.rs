//! Toast notifications
//!
//! Short messages shown above the footer after an action completes or fails.

use iocraft::prelude::*;
use std::time::{Duration, Instant};

use crate::error::HelpdeskError;

/// How long a toast stays up
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    /// When the toast was created
    pub timestamp: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
    Success,
}

impl Toast {
    pub fn new(message: String, level: ToastLevel) -> Self {
        Self {
            message,
            level,
            timestamp: Instant::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Error)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Success)
    }

    /// An error toast carrying the user-facing text of `err`
    pub fn from_error(err: &HelpdeskError) -> Self {
        Self::error(err.user_message())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.timestamp) >= TOAST_DURATION
    }

    pub fn color(&self) -> Color {
        match self.level {
            ToastLevel::Info => Color::Cyan,
            ToastLevel::Warning => Color::Yellow,
            ToastLevel::Error => Color::Red,
            ToastLevel::Success => Color::Green,
        }
    }
}

/// Render a toast notification as an optional element
pub fn render_toast(toast: &Option<Toast>) -> Option<AnyElement<'static>> {
    toast.as_ref().map(|t| {
        element! {
            View(
                width: 100pct,
                height: 3,
                flex_shrink: 0.0,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                background_color: Color::Black,
                border_edges: Edges::Top,
                border_style: BorderStyle::Single,
                border_color: t.color(),
            ) {
                Text(content: t.message.clone(), color: t.color())
            }
        }
        .into_any()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_from_auth_error_uses_generic_message() {
        let toast = Toast::from_error(&HelpdeskError::Auth("invalid_grant".into()));
        assert_eq!(toast.level, ToastLevel::Error);
        assert_eq!(toast.message, crate::error::INVALID_CREDENTIALS_MESSAGE);
    }

    #[test]
    fn test_toast_expiry() {
        let toast = Toast::success("saved");
        assert!(!toast.is_expired_at(toast.timestamp));
        assert!(toast.is_expired_at(toast.timestamp + TOAST_DURATION));
    }
}
