//! Core logic for the input-driven counter.
//!
//! This crate contains:
//! - Input model: decoded input events and the tracked-input filter
//! - Settings: validated snapshots and mode resolution
//! - Accumulator: the classification state machine that decides when the
//!   count advances
//! - Event pump: the single-writer loop that serializes inputs, settings
//!   swaps and control operations

mod accumulator;
pub mod hook;
pub mod input;
pub mod notification;
pub mod pump;
pub mod settings;
pub mod types;

pub use accumulator::{Accumulator, Classification, Outcome, SCROLL_DEBOUNCE_MS};
pub use hook::{DetachedHook, HookError, InputHook, UnavailableHook};
pub use input::{InputEvent, InputKind, MouseButton, TrackedInput, WheelDirection};
pub use notification::{Notification, Status};
pub use pump::{ControlOp, EventPump, PumpHandle, PumpMessage};
pub use settings::{Mode, Settings, SettingsDraft};
pub use types::{KeyCode, ValidationError};
