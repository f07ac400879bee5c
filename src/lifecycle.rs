//! Ticket status lifecycle.
//!
//! Every status change made from the dashboard or the CLI is checked here, so
//! the rule for which transitions are legal lives in exactly one place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{HelpdeskError, Result};
use crate::types::TicketStatus;

/// Which transitions the lifecycle accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// OPEN -> PROSES -> SELESAI, skipping allowed, never backwards.
    #[default]
    ForwardOnly,
    /// Any status may be set from any status.
    Any,
}

impl fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionPolicy::ForwardOnly => write!(f, "forward_only"),
            TransitionPolicy::Any => write!(f, "any"),
        }
    }
}

impl FromStr for TransitionPolicy {
    type Err = HelpdeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "forward_only" | "forward-only" | "forward" => Ok(TransitionPolicy::ForwardOnly),
            "any" => Ok(TransitionPolicy::Any),
            _ => Err(HelpdeskError::Config(format!(
                "unknown transition policy '{}', expected 'forward_only' or 'any'",
                s
            ))),
        }
    }
}

/// A status change requested by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// OPEN -> PROSES
    Start,
    /// Any non-terminal status -> SELESAI
    Complete,
    /// Explicit target status
    SetStatus(TicketStatus),
}

impl Transition {
    pub fn target(self) -> TicketStatus {
        match self {
            Transition::Start => TicketStatus::Proses,
            Transition::Complete => TicketStatus::Selesai,
            Transition::SetStatus(status) => status,
        }
    }
}

impl TransitionPolicy {
    pub fn allows(self, from: TicketStatus, to: TicketStatus) -> bool {
        match self {
            TransitionPolicy::Any => true,
            TransitionPolicy::ForwardOnly => to.rank() >= from.rank(),
        }
    }

    /// Resolve a requested transition against the current status.
    ///
    /// `Start` is only meaningful from OPEN and `Complete` only from a
    /// non-terminal status, regardless of policy.
    pub fn resolve(self, from: TicketStatus, transition: Transition) -> Result<TicketStatus> {
        let to = transition.target();
        let legal = match transition {
            Transition::Start => from == TicketStatus::Open,
            Transition::Complete => !from.is_terminal(),
            Transition::SetStatus(_) => self.allows(from, to),
        };

        if legal {
            Ok(to)
        } else {
            Err(HelpdeskError::InvalidTransition { from, to })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_only_rejects_regression() {
        let policy = TransitionPolicy::ForwardOnly;
        assert!(policy.allows(TicketStatus::Open, TicketStatus::Selesai));
        assert!(policy.allows(TicketStatus::Proses, TicketStatus::Proses));
        assert!(!policy.allows(TicketStatus::Selesai, TicketStatus::Open));
        assert!(!policy.allows(TicketStatus::Proses, TicketStatus::Open));
    }

    #[test]
    fn test_any_allows_everything() {
        for from in TicketStatus::ALL {
            for to in TicketStatus::ALL {
                assert!(TransitionPolicy::Any.allows(from, to));
            }
        }
    }

    #[test]
    fn test_start_only_from_open() {
        let policy = TransitionPolicy::Any;
        assert_eq!(
            policy.resolve(TicketStatus::Open, Transition::Start).unwrap(),
            TicketStatus::Proses
        );
        assert!(policy.resolve(TicketStatus::Proses, Transition::Start).is_err());
    }

    #[test]
    fn test_complete_from_any_non_terminal() {
        let policy = TransitionPolicy::ForwardOnly;
        for from in [TicketStatus::Open, TicketStatus::Proses] {
            assert_eq!(
                policy.resolve(from, Transition::Complete).unwrap(),
                TicketStatus::Selesai
            );
        }
        assert!(matches!(
            policy.resolve(TicketStatus::Selesai, Transition::Complete),
            Err(HelpdeskError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_same_status_is_idempotent() {
        let policy = TransitionPolicy::ForwardOnly;
        for status in TicketStatus::ALL {
            assert_eq!(
                policy
                    .resolve(status, Transition::SetStatus(status))
                    .unwrap(),
                status
            );
        }
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "forward_only".parse::<TransitionPolicy>().unwrap(),
            TransitionPolicy::ForwardOnly
        );
        assert_eq!("ANY".parse::<TransitionPolicy>().unwrap(), TransitionPolicy::Any);
        assert!("loose".parse::<TransitionPolicy>().is_err());
    }
}
