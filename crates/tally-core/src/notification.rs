//! Outbound notifications from the pump to the display collaborator.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::input::TrackedInput;

/// Human-facing status messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    CoreStarted,
    Tracking(TrackedInput),
    HookUnavailable { reason: String },
    RapidCount,
    BurstCompleted { completed: u32, amount: u32 },
    MultiClickCount { amount: u32 },
    BurstCount,
    MultiBurstCount { amount: u32 },
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoreStarted => write!(f, "Core started. Waiting for input..."),
            Self::Tracking(tracked) => write!(f, "Tracking {tracked}"),
            Self::HookUnavailable { reason } => write!(f, "Input hook unavailable: {reason}"),
            Self::RapidCount => write!(f, "Rapid Mode: +1"),
            Self::BurstCompleted { completed, amount } => {
                write!(f, "Burst Completed ({completed}/{amount})")
            }
            Self::MultiClickCount { amount } => write!(f, "Multi-Click Count ({amount} met)"),
            Self::BurstCount => write!(f, "Burst Count (First Press)"),
            Self::MultiBurstCount { amount } => {
                write!(f, "Multi-Burst Count ({amount} bursts met)")
            }
        }
    }
}

impl Serialize for Status {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// A message for the display collaborator.
///
/// `Count` is emitted for every accepted change; consumers may coalesce
/// `Status` and `SequenceProgress` but must not skip counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Notification {
    Count(i64),
    Paused(bool),
    Status(Status),
    SequenceProgress(u32),
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "count {n}"),
            Self::Paused(true) => write!(f, "paused"),
            Self::Paused(false) => write!(f, "resumed"),
            Self::Status(status) => write!(f, "status {status}"),
            Self::SequenceProgress(n) => write!(f, "sequence {n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseButton;

    #[test]
    fn status_text() {
        assert_eq!(
            Status::BurstCompleted {
                completed: 2,
                amount: 3
            }
            .to_string(),
            "Burst Completed (2/3)"
        );
        assert_eq!(
            Status::Tracking(TrackedInput::Mouse {
                button: MouseButton::Left
            })
            .to_string(),
            "Tracking Mouse: Left Click"
        );
    }

    #[test]
    fn notification_json() {
        let json = serde_json::to_string(&Notification::Count(4)).unwrap();
        assert_eq!(json, r#"{"kind":"count","value":4}"#);

        let json = serde_json::to_string(&Notification::Status(Status::BurstCount)).unwrap();
        assert_eq!(json, r#"{"kind":"status","value":"Burst Count (First Press)"}"#);
    }
}
