//! Settings snapshots and mode resolution.
//!
//! Collaborators build a [`SettingsDraft`] from whatever they hold (UI state,
//! a config file) and hand it to the pump. [`Settings::from_draft`] is the
//! only way to obtain a [`Settings`], so every snapshot the accumulator sees
//! has already been clamped and has a resolved [`Mode`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::TrackedInput;

/// How qualifying events turn into counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Every event counts.
    Rapid,
    /// Every `amount`-th event counts (`idle_ms == 0`).
    MultiClick,
    /// The first event of each idle-separated sequence counts (`amount == 1`).
    Burst,
    /// The first event after `amount` completed sequences counts.
    MultiBurst,
}

impl Mode {
    /// Resolves the mode from the rapid toggle and the already-clamped
    /// idle window and amount.
    pub const fn resolve(rapid: bool, idle_ms: u64, amount: u32) -> Self {
        if rapid {
            Self::Rapid
        } else if idle_ms == 0 {
            Self::MultiClick
        } else if amount == 1 {
            Self::Burst
        } else {
            Self::MultiBurst
        }
    }

    /// One-line description shown next to the amount field.
    pub fn describe(self, amount: u32) -> String {
        match self {
            Self::Rapid => "Mode: Rapid (1:1 counting)".to_string(),
            Self::MultiClick => format!("Mode: Multi-Click (Count every {amount} presses)"),
            Self::Burst => "Mode: Burst (Count on 1st click, idle resets)".to_string(),
            Self::MultiBurst => {
                format!("Mode: Multi-Burst (Count on 1st click of {amount}th burst)")
            }
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Rapid => "rapid",
            Self::MultiClick => "multi_click",
            Self::Burst => "burst",
            Self::MultiBurst => "multi_burst",
        };
        write!(f, "{s}")
    }
}

/// Unvalidated settings as supplied by a collaborator.
///
/// `amount` and `idle_ms` are signed so that out-of-range values coming from
/// a UI spinner or a hand-edited file survive until ingestion clamps them.
/// Legacy settings-file names are accepted for every field that was renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsDraft {
    pub tracked: TrackedInput,
    #[serde(alias = "is_rapid_mode")]
    pub rapid_mode: bool,
    #[serde(alias = "group_n")]
    pub amount: i64,
    #[serde(alias = "burst_idle_ms")]
    pub idle_ms: i64,
    #[serde(alias = "is_paused")]
    pub paused: bool,
    pub count: i64,
}

impl Default for SettingsDraft {
    fn default() -> Self {
        Self {
            tracked: TrackedInput::default(),
            rapid_mode: true,
            amount: 1,
            idle_ms: 0,
            paused: false,
            count: 0,
        }
    }
}

/// An immutable, validated settings snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    tracked: TrackedInput,
    mode: Mode,
    amount: u32,
    idle_ms: u64,
    paused: bool,
    count: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_draft(SettingsDraft::default())
    }
}

impl Settings {
    /// Clamps `amount` to at least 1 and `idle_ms` to at least 0, then
    /// resolves the mode. Never fails.
    pub fn from_draft(draft: SettingsDraft) -> Self {
        let amount = u32::try_from(draft.amount.max(1)).unwrap_or(u32::MAX);
        let idle_ms = u64::try_from(draft.idle_ms).unwrap_or(0);

        if i64::from(amount) != draft.amount || draft.idle_ms < 0 {
            tracing::debug!(
                amount = draft.amount,
                idle_ms = draft.idle_ms,
                clamped_amount = amount,
                clamped_idle_ms = idle_ms,
                "clamped settings"
            );
        }

        Self {
            tracked: draft.tracked,
            mode: Mode::resolve(draft.rapid_mode, idle_ms, amount),
            amount,
            idle_ms,
            paused: draft.paused,
            count: draft.count,
        }
    }

    pub const fn tracked(&self) -> &TrackedInput {
        &self.tracked
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub const fn amount(&self) -> u32 {
        self.amount
    }

    pub const fn idle_ms(&self) -> u64 {
        self.idle_ms
    }

    pub const fn paused(&self) -> bool {
        self.paused
    }

    pub const fn count(&self) -> i64 {
        self.count
    }

    /// Returns a copy with the pause flag replaced.
    #[must_use]
    pub fn with_paused(&self, paused: bool) -> Self {
        Self {
            paused,
            ..self.clone()
        }
    }

    /// Returns a copy carrying `count` as the source of truth.
    #[must_use]
    pub fn with_count(&self, count: i64) -> Self {
        Self {
            count,
            ..self.clone()
        }
    }

    /// Mode description for display.
    pub fn describe(&self) -> String {
        self.mode.describe(self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(rapid_mode: bool, amount: i64, idle_ms: i64) -> SettingsDraft {
        SettingsDraft {
            rapid_mode,
            amount,
            idle_ms,
            ..SettingsDraft::default()
        }
    }

    #[test]
    fn resolves_all_modes() {
        assert_eq!(Settings::from_draft(draft(true, 5, 300)).mode(), Mode::Rapid);
        assert_eq!(
            Settings::from_draft(draft(false, 3, 0)).mode(),
            Mode::MultiClick
        );
        assert_eq!(Settings::from_draft(draft(false, 1, 300)).mode(), Mode::Burst);
        assert_eq!(
            Settings::from_draft(draft(false, 2, 300)).mode(),
            Mode::MultiBurst
        );
    }

    #[test]
    fn clamps_amount_and_idle() {
        let settings = Settings::from_draft(draft(false, -4, -250));
        assert_eq!(settings.amount(), 1);
        assert_eq!(settings.idle_ms(), 0);
        assert_eq!(settings.mode(), Mode::MultiClick);

        let settings = Settings::from_draft(draft(false, 0, 500));
        assert_eq!(settings.amount(), 1);
        assert_eq!(settings.mode(), Mode::Burst);
    }

    #[test]
    fn clamps_oversized_amount() {
        let settings = Settings::from_draft(draft(false, i64::MAX, 0));
        assert_eq!(settings.amount(), u32::MAX);
    }

    #[test]
    fn draft_accepts_legacy_field_names() {
        let json = r#"{"rapid_mode": false, "group_n": 3, "burst_idle_ms": 400}"#;
        let draft: SettingsDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.amount, 3);
        assert_eq!(draft.idle_ms, 400);
        assert_eq!(draft.tracked, TrackedInput::default());
    }

    #[test]
    fn draft_accepts_legacy_flag_names() {
        let json = r#"{"is_rapid_mode": false, "is_paused": true, "group_n": 2, "burst_idle_ms": 0}"#;
        let draft: SettingsDraft = serde_json::from_str(json).unwrap();
        assert!(!draft.rapid_mode);
        assert!(draft.paused);

        let settings = Settings::from_draft(draft);
        assert_eq!(settings.mode(), Mode::MultiClick);
        assert_eq!(settings.amount(), 2);
    }

    #[test]
    fn with_helpers_keep_other_fields() {
        let settings = Settings::from_draft(draft(false, 2, 300)).with_count(9);
        let paused = settings.with_paused(true);
        assert!(paused.paused());
        assert_eq!(paused.count(), 9);
        assert_eq!(paused.mode(), Mode::MultiBurst);
    }

    #[test]
    fn describe_modes() {
        insta::assert_snapshot!(
            Settings::from_draft(draft(false, 4, 0)).describe(),
            @"Mode: Multi-Click (Count every 4 presses)"
        );
        insta::assert_snapshot!(
            Settings::from_draft(draft(false, 3, 200)).describe(),
            @"Mode: Multi-Burst (Count on 1st click of 3th burst)"
        );
    }
}
