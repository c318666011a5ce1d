//! Input-source collaborator contract.
//!
//! A hook owns whatever global interception the platform requires. The pump
//! arms it for the tracked input at startup and after every settings swap,
//! and releases it when the pump stops. Decoded events do not flow through
//! this trait; the hook pushes them into a [`PumpHandle`](crate::PumpHandle).

use thiserror::Error;

use crate::input::TrackedInput;

/// Hook errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HookError {
    /// The platform hook cannot be installed (missing privileges, no
    /// display server, blocked by other software).
    #[error("{reason}")]
    Unavailable { reason: String },
}

/// A platform input hook.
pub trait InputHook: Send {
    /// Installs (or re-targets) interception for `tracked`.
    fn arm(&mut self, tracked: &TrackedInput) -> Result<(), HookError>;

    /// Removes any interception installed by `arm`. Must be idempotent.
    fn release(&mut self);
}

/// A hook whose events are pushed by the owner directly. Arming always
/// succeeds.
#[derive(Debug, Default)]
pub struct DetachedHook {
    armed: Option<TrackedInput>,
}

impl DetachedHook {
    pub const fn armed(&self) -> Option<&TrackedInput> {
        self.armed.as_ref()
    }
}

impl InputHook for DetachedHook {
    fn arm(&mut self, tracked: &TrackedInput) -> Result<(), HookError> {
        self.armed = Some(*tracked);
        Ok(())
    }

    fn release(&mut self) {
        self.armed = None;
    }
}

/// A hook that can never be installed. The pump runs in degraded mode with
/// control operations only.
#[derive(Debug, Clone)]
pub struct UnavailableHook {
    reason: String,
}

impl UnavailableHook {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl InputHook for UnavailableHook {
    fn arm(&mut self, _tracked: &TrackedInput) -> Result<(), HookError> {
        Err(HookError::Unavailable {
            reason: self.reason.clone(),
        })
    }

    fn release(&mut self) {}
}
