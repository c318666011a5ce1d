//! Event classification and count accumulation.
//!
//! # Algorithm Summary
//!
//! 1. Drop events that are not the tracked input, then debounce wheel events
//!    against the previous accepted wheel event.
//! 2. Rapid mode counts every event and keeps no sequence state.
//! 3. Otherwise an idle gap longer than `idle_ms` closes the open sequence
//!    (crediting one completed burst if it held any presses) before the new
//!    event opens or extends a sequence.
//! 4. The mode then decides whether this event advances the count.
//!
//! Pausing only gates the count. Sequence and burst bookkeeping runs the same
//! way whether paused or not, so unpausing never credits missed counts.

use crate::input::InputEvent;
use crate::notification::{Notification, Status};
use crate::settings::{Mode, Settings};

/// Minimum spacing between two accepted wheel events.
pub const SCROLL_DEBOUNCE_MS: i64 = 100;

/// Live counters owned by the pump.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulator {
    count: i64,
    sequence_presses: u32,
    completed_bursts: u32,
    last_event_at_ms: Option<i64>,
    last_wheel_at_ms: Option<i64>,
}

/// Result of classifying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The event is not the tracked input.
    Untracked,
    /// A wheel event inside the debounce window. State is untouched.
    Debounced,
    /// The event was taken into the sequence bookkeeping.
    Accepted(Outcome),
}

/// What an accepted event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// 1 if the visible count advanced, 0 otherwise (always 0 while paused).
    pub count_delta: i64,
    /// Count after applying `count_delta`.
    pub count: i64,
    /// Presses in the current sequence after this event.
    pub sequence_presses: u32,
    /// Statuses in emission order.
    pub statuses: Vec<Status>,
}

impl Outcome {
    /// Flattens the outcome into notifications in display order: completed
    /// bursts, the count change, the mode status, then sequence progress.
    pub fn notifications(&self) -> Vec<Notification> {
        let mut out = Vec::with_capacity(self.statuses.len() + 2);
        let (closing, rest): (Vec<_>, Vec<_>) = self
            .statuses
            .iter()
            .cloned()
            .partition(|s| matches!(s, Status::BurstCompleted { .. }));

        out.extend(closing.into_iter().map(Notification::Status));
        if self.count_delta != 0 {
            out.push(Notification::Count(self.count));
        }
        out.extend(rest.into_iter().map(Notification::Status));
        out.push(Notification::SequenceProgress(self.sequence_presses));
        out
    }
}

impl Accumulator {
    /// Creates an accumulator starting at `count` with no open sequence.
    pub fn new(count: i64) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    pub const fn count(&self) -> i64 {
        self.count
    }

    pub const fn sequence_presses(&self) -> u32 {
        self.sequence_presses
    }

    pub const fn completed_bursts(&self) -> u32 {
        self.completed_bursts
    }

    pub const fn last_event_at_ms(&self) -> Option<i64> {
        self.last_event_at_ms
    }

    /// Classifies `event` against `settings`, updating state.
    pub fn classify(&mut self, event: &InputEvent, settings: &Settings) -> Classification {
        if !settings.tracked().matches(&event.kind) {
            return Classification::Untracked;
        }

        let now = event.timestamp_ms;
        if event.kind.is_wheel() {
            if let Some(last) = self.last_wheel_at_ms {
                if now.saturating_sub(last) < SCROLL_DEBOUNCE_MS {
                    tracing::trace!(now, last, "wheel event debounced");
                    return Classification::Debounced;
                }
            }
            self.last_wheel_at_ms = Some(now);
        }

        let mut statuses = Vec::new();
        let amount = settings.amount();
        let advanced = match settings.mode() {
            Mode::Rapid => {
                self.sequence_presses = 0;
                self.completed_bursts = 0;
                self.last_event_at_ms = Some(now);
                statuses.push(Status::RapidCount);
                true
            }
            Mode::MultiClick => {
                self.extend_sequence(now, settings, &mut statuses);
                let met = self.sequence_presses % amount == 0;
                if met {
                    statuses.push(Status::MultiClickCount { amount });
                }
                met
            }
            Mode::Burst => {
                self.extend_sequence(now, settings, &mut statuses);
                let met = self.sequence_presses == 1;
                if met {
                    statuses.push(Status::BurstCount);
                }
                met
            }
            Mode::MultiBurst => {
                self.extend_sequence(now, settings, &mut statuses);
                let met = self.sequence_presses == 1 && self.completed_bursts >= amount;
                if met {
                    statuses.push(Status::MultiBurstCount { amount });
                    self.completed_bursts = 0;
                }
                met
            }
        };

        let count_delta = if advanced && !settings.paused() {
            self.count = self.count.saturating_add(1);
            1
        } else {
            0
        };

        tracing::debug!(
            mode = %settings.mode(),
            sequence_presses = self.sequence_presses,
            completed_bursts = self.completed_bursts,
            advanced,
            count = self.count,
            "classified event"
        );

        Classification::Accepted(Outcome {
            count_delta,
            count: self.count,
            sequence_presses: self.sequence_presses,
            statuses,
        })
    }

    /// Shared prelude of the non-rapid modes: close the open sequence if the
    /// idle window has elapsed, then count this event into the sequence.
    fn extend_sequence(&mut self, now: i64, settings: &Settings, statuses: &mut Vec<Status>) {
        if settings.idle_ms() > 0 {
            if let Some(last) = self.last_event_at_ms {
                let idle = now.saturating_sub(last);
                if u64::try_from(idle).is_ok_and(|idle| idle > settings.idle_ms()) {
                    if self.sequence_presses > 0 {
                        self.completed_bursts = self.completed_bursts.saturating_add(1);
                        statuses.push(Status::BurstCompleted {
                            completed: self.completed_bursts,
                            amount: settings.amount(),
                        });
                    }
                    self.sequence_presses = 0;
                }
            }
        }

        self.sequence_presses = self.sequence_presses.saturating_add(1);
        self.last_event_at_ms = Some(now);
    }

    /// Overwrites the count and clears sequence state.
    pub fn set_count(&mut self, count: i64) {
        self.count = count;
        self.reset_sequence();
    }

    /// Clears in-flight sequence and burst progress, keeping the count.
    pub fn reset_sequence(&mut self) {
        self.sequence_presses = 0;
        self.completed_bursts = 0;
    }

    /// Applies a manual adjustment unless paused. Returns the new count if
    /// it changed.
    pub fn adjust(&mut self, delta: i64, paused: bool) -> Option<i64> {
        if paused {
            return None;
        }
        self.count = self.count.saturating_add(delta);
        Some(self.count)
    }
}
