use thiserror::Error;

use crate::types::TicketStatus;

/// Message shown to users when a sign-in is rejected. Never carries provider detail.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Kredensial tidak valid. Silakan coba lagi.";

#[derive(Error, Debug)]
pub enum HelpdeskError {
    #[error("ticket '{0}' not found")]
    TicketNotFound(String),

    #[error("invalid status '{0}', expected one of OPEN, PROSES, SELESAI")]
    InvalidStatus(String),

    #[error("cannot move ticket from {from} to {to}")]
    InvalidTransition {
        from: TicketStatus,
        to: TicketStatus,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("not logged in. Run: helpdesk login")]
    NotAuthenticated,

    #[error("API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

impl HelpdeskError {
    /// Text safe to show in the UI. Authentication failures collapse to a generic message.
    pub fn user_message(&self) -> String {
        match self {
            HelpdeskError::Auth(_) => INVALID_CREDENTIALS_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HelpdeskError>;
