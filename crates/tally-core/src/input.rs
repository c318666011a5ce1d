//! Decoded input events and the tracked-input filter.
//!
//! Physical capture happens elsewhere; the core only sees events that a
//! platform hook has already decoded into [`InputEvent`] records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{KeyCode, ValidationError};

/// Legacy numeric code for "scroll wheel up" in mouse configurations.
pub const WHEEL_UP_CODE: u32 = 10;
/// Legacy numeric code for "scroll wheel down" in mouse configurations.
pub const WHEEL_DOWN_CODE: u32 = 11;

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// First thumb button (X1).
    Back,
    /// Second thumb button (X2).
    Forward,
}

impl MouseButton {
    /// Resolves a legacy numeric button code (1..=5).
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Left),
            2 => Some(Self::Middle),
            3 => Some(Self::Right),
            4 => Some(Self::Back),
            5 => Some(Self::Forward),
            _ => None,
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Left => "Left Click",
            Self::Middle => "Middle Click",
            Self::Right => "Right Click",
            Self::Back => "Thumb 1 (Back)",
            Self::Forward => "Thumb 2 (Forward)",
        }
    }
}

impl FromStr for MouseButton {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "middle" => Ok(Self::Middle),
            "right" => Ok(Self::Right),
            "back" | "x" | "x1" => Ok(Self::Back),
            "forward" | "x2" => Ok(Self::Forward),
            _ => Err(ValidationError::UnknownMouseButton {
                value: s.to_string(),
            }),
        }
    }
}

/// Scroll wheel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WheelDirection {
    Up,
    Down,
}

impl WheelDirection {
    /// Resolves the direction from a raw wheel delta; zero has no direction.
    pub const fn from_delta(delta: i32) -> Option<Self> {
        if delta > 0 {
            Some(Self::Up)
        } else if delta < 0 {
            Some(Self::Down)
        } else {
            None
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Up => "Scroll Wheel Up",
            Self::Down => "Scroll Wheel Down",
        }
    }
}

impl FromStr for WheelDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(ValidationError::UnknownWheelDirection {
                value: s.to_string(),
            }),
        }
    }
}

/// The single key or mouse action currently driving the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrackedInput {
    Key { code: KeyCode },
    Mouse { button: MouseButton },
    Wheel { direction: WheelDirection },
}

impl Default for TrackedInput {
    /// Scan code 44 (`z` on most layouts).
    fn default() -> Self {
        Self::Key { code: KeyCode(44) }
    }
}

impl TrackedInput {
    /// Resolves the `(input_type, input_code)` pair used by configuration
    /// files. Mouse codes 1..=5 are buttons, 10 and 11 are the wheel.
    pub fn from_legacy(input_type: &str, code: u32) -> Result<Self, ValidationError> {
        match input_type {
            "keyboard" => Ok(Self::Key {
                code: KeyCode(code),
            }),
            "mouse" => match code {
                WHEEL_UP_CODE => Ok(Self::Wheel {
                    direction: WheelDirection::Up,
                }),
                WHEEL_DOWN_CODE => Ok(Self::Wheel {
                    direction: WheelDirection::Down,
                }),
                _ => MouseButton::from_code(code)
                    .map(|button| Self::Mouse { button })
                    .ok_or(ValidationError::UnknownMouseCode { code }),
            },
            other => Err(ValidationError::UnknownInputType {
                value: other.to_string(),
            }),
        }
    }

    /// Returns true if `kind` is an occurrence of this tracked input.
    pub fn matches(&self, kind: &InputKind) -> bool {
        match (self, kind) {
            (Self::Key { code }, InputKind::KeyDown { code: got }) => code == got,
            (Self::Mouse { button }, InputKind::MouseButtonDown { button: got }) => button == got,
            (Self::Wheel { direction }, InputKind::MouseWheel { direction: got }) => {
                direction == got
            }
            _ => false,
        }
    }

    /// Human-readable label for the tracked input.
    pub fn label(&self) -> String {
        match self {
            Self::Key { code } => format!("Code {code}"),
            Self::Mouse { button } => button.label().to_string(),
            Self::Wheel { direction } => direction.label().to_string(),
        }
    }
}

impl fmt::Display for TrackedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key { .. } => write!(f, "Key: {}", self.label()),
            Self::Mouse { .. } | Self::Wheel { .. } => write!(f, "Mouse: {}", self.label()),
        }
    }
}

/// What physically happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputKind {
    KeyDown { code: KeyCode },
    MouseButtonDown { button: MouseButton },
    MouseWheel { direction: WheelDirection },
}

impl InputKind {
    pub const fn is_wheel(&self) -> bool {
        matches!(self, Self::MouseWheel { .. })
    }
}

/// A decoded input event delivered by the hook collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    #[serde(flatten)]
    pub kind: InputKind,
    /// Milliseconds on a monotonic-enough clock shared by all events.
    pub timestamp_ms: i64,
}

impl InputEvent {
    pub const fn key_down(code: u32, timestamp_ms: i64) -> Self {
        Self {
            kind: InputKind::KeyDown {
                code: KeyCode(code),
            },
            timestamp_ms,
        }
    }

    pub const fn mouse_down(button: MouseButton, timestamp_ms: i64) -> Self {
        Self {
            kind: InputKind::MouseButtonDown { button },
            timestamp_ms,
        }
    }

    pub const fn wheel(direction: WheelDirection, timestamp_ms: i64) -> Self {
        Self {
            kind: InputKind::MouseWheel { direction },
            timestamp_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_codes_resolve() {
        assert_eq!(
            TrackedInput::from_legacy("keyboard", 44).unwrap(),
            TrackedInput::Key { code: KeyCode(44) }
        );
        assert_eq!(
            TrackedInput::from_legacy("mouse", 3).unwrap(),
            TrackedInput::Mouse {
                button: MouseButton::Right
            }
        );
        assert_eq!(
            TrackedInput::from_legacy("mouse", 11).unwrap(),
            TrackedInput::Wheel {
                direction: WheelDirection::Down
            }
        );
    }

    #[test]
    fn mouse_codes_cover_five_buttons() {
        assert_eq!(MouseButton::from_code(1), Some(MouseButton::Left));
        assert_eq!(MouseButton::from_code(4), Some(MouseButton::Back));
        assert_eq!(MouseButton::from_code(5), Some(MouseButton::Forward));
        assert_eq!(MouseButton::from_code(0), None);
        assert_eq!(MouseButton::from_code(WHEEL_UP_CODE), None);
    }

    #[test]
    fn legacy_codes_reject_unknown() {
        assert_eq!(
            TrackedInput::from_legacy("mouse", 7),
            Err(ValidationError::UnknownMouseCode { code: 7 })
        );
        assert!(matches!(
            TrackedInput::from_legacy("gamepad", 1),
            Err(ValidationError::UnknownInputType { .. })
        ));
    }

    #[test]
    fn matches_only_same_input() {
        let tracked = TrackedInput::Wheel {
            direction: WheelDirection::Up,
        };
        assert!(tracked.matches(&InputEvent::wheel(WheelDirection::Up, 0).kind));
        assert!(!tracked.matches(&InputEvent::wheel(WheelDirection::Down, 0).kind));
        assert!(!tracked.matches(&InputEvent::key_down(10, 0).kind));

        let tracked = TrackedInput::Key { code: KeyCode(44) };
        assert!(tracked.matches(&InputEvent::key_down(44, 0).kind));
        assert!(!tracked.matches(&InputEvent::key_down(45, 0).kind));
    }

    #[test]
    fn wheel_direction_from_delta() {
        assert_eq!(WheelDirection::from_delta(120), Some(WheelDirection::Up));
        assert_eq!(WheelDirection::from_delta(-1), Some(WheelDirection::Down));
        assert_eq!(WheelDirection::from_delta(0), None);
    }

    #[test]
    fn tracked_input_display() {
        let key = TrackedInput::Key { code: KeyCode(44) };
        assert_eq!(key.to_string(), "Key: Code 44");
        let back = TrackedInput::Mouse {
            button: MouseButton::Back,
        };
        assert_eq!(back.to_string(), "Mouse: Thumb 1 (Back)");
    }

    #[test]
    fn input_event_json_shape() {
        let json = r#"{"type":"mouse_wheel","direction":"down","timestamp_ms":150}"#;
        let event: InputEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, InputEvent::wheel(WheelDirection::Down, 150));
    }

    #[test]
    fn mouse_button_parses_aliases() {
        assert_eq!("X2".parse::<MouseButton>().unwrap(), MouseButton::Forward);
        assert!("wheel".parse::<MouseButton>().is_err());
    }
}
