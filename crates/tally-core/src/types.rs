//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The input type was neither keyboard nor mouse.
    #[error("unknown input type: {value}")]
    UnknownInputType { value: String },

    /// The mouse code does not name a button or wheel direction.
    #[error("unknown mouse input code: {code}")]
    UnknownMouseCode { code: u32 },

    /// The mouse button name was not recognised.
    #[error("unknown mouse button: {value}")]
    UnknownMouseButton { value: String },

    /// The wheel direction was neither up nor down.
    #[error("unknown wheel direction: {value}")]
    UnknownWheelDirection { value: String },
}

/// An opaque platform key identifier (scan code).
///
/// The core never interprets the value; it only compares it against the
/// tracked input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u32);

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
