//! Single-writer control loop.
//!
//! The pump owns the live [`Settings`] and [`Accumulator`]. Producers (the
//! input hook, a settings panel, hotkeys) only ever enqueue [`PumpMessage`]s
//! through a [`PumpHandle`]; the pump applies them one at a time in arrival
//! order and publishes [`Notification`]s.
//!
//! Both channels are unbounded: producers never block and control messages
//! are never dropped. Count notifications are never coalesced.

use std::ops::ControlFlow;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::accumulator::{Accumulator, Classification};
use crate::hook::InputHook;
use crate::input::InputEvent;
use crate::notification::{Notification, Status};
use crate::settings::{Settings, SettingsDraft};

/// A discrete control operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlOp {
    Increment,
    Decrement,
    SetCount(i64),
    TogglePause,
    Stop,
}

/// Everything the pump consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PumpMessage {
    Input(InputEvent),
    ReplaceSettings(SettingsDraft),
    Control(ControlOp),
}

/// Cloneable sender side of the pump.
///
/// Every method is fire-and-forget. Once the pump has stopped, sends are
/// silently discarded.
#[derive(Debug, Clone)]
pub struct PumpHandle {
    tx: mpsc::UnboundedSender<PumpMessage>,
}

impl PumpHandle {
    pub fn send(&self, msg: PumpMessage) {
        if self.tx.send(msg).is_err() {
            debug!("pump stopped, message dropped");
        }
    }

    /// Delivers a decoded input event.
    pub fn input(&self, event: InputEvent) {
        self.send(PumpMessage::Input(event));
    }

    /// Replaces the live settings wholesale.
    pub fn replace_settings(&self, draft: SettingsDraft) {
        self.send(PumpMessage::ReplaceSettings(draft));
    }

    pub fn control(&self, op: ControlOp) {
        self.send(PumpMessage::Control(op));
    }

    pub fn increment(&self) {
        self.control(ControlOp::Increment);
    }

    pub fn decrement(&self) {
        self.control(ControlOp::Decrement);
    }

    pub fn set_count(&self, count: i64) {
        self.control(ControlOp::SetCount(count));
    }

    pub fn toggle_pause(&self) {
        self.control(ControlOp::TogglePause);
    }

    pub fn stop(&self) {
        self.control(ControlOp::Stop);
    }

    /// Returns true once the pump has exited.
    pub fn is_stopped(&self) -> bool {
        self.tx.is_closed()
    }
}

/// The pump state. Use [`EventPump::spawn`] to run it as a task, or drive
/// [`EventPump::handle_message`] directly.
pub struct EventPump<H> {
    settings: Settings,
    accumulator: Accumulator,
    hook: H,
    hook_degraded: bool,
    notify: mpsc::UnboundedSender<Notification>,
}

impl<H: InputHook> EventPump<H> {
    pub fn new(draft: SettingsDraft, hook: H, notify: mpsc::UnboundedSender<Notification>) -> Self {
        let settings = Settings::from_draft(draft);
        Self {
            accumulator: Accumulator::new(settings.count()),
            settings,
            hook,
            hook_degraded: false,
            notify,
        }
    }

    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    pub const fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    /// Live settings with the running count folded in, suitable for
    /// persisting.
    pub fn snapshot(&self) -> Settings {
        self.settings.with_count(self.accumulator.count())
    }

    /// Announces startup, arms the hook and publishes the initial state.
    pub fn start(&mut self) {
        self.emit(Notification::Status(Status::CoreStarted));
        self.arm_hook();
        self.emit(Notification::Count(self.accumulator.count()));
        self.emit(Notification::Paused(self.settings.paused()));
    }

    /// Applies one message.
    pub fn handle_message(&mut self, msg: PumpMessage) -> ControlFlow<()> {
        match msg {
            PumpMessage::Input(event) => self.handle_input(&event),
            PumpMessage::ReplaceSettings(draft) => self.replace_settings(draft),
            PumpMessage::Control(op) => return self.handle_control(op),
        }
        ControlFlow::Continue(())
    }

    /// Releases the hook. Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.hook.release();
        info!(count = self.accumulator.count(), "pump stopped");
    }

    fn handle_input(&mut self, event: &InputEvent) {
        match self.accumulator.classify(event, &self.settings) {
            Classification::Untracked | Classification::Debounced => {}
            Classification::Accepted(outcome) => {
                for n in outcome.notifications() {
                    self.emit(n);
                }
            }
        }
    }

    fn replace_settings(&mut self, draft: SettingsDraft) {
        let settings = Settings::from_draft(draft);
        info!(
            mode = %settings.mode(),
            amount = settings.amount(),
            idle_ms = settings.idle_ms(),
            tracked = %settings.tracked(),
            "settings replaced"
        );
        self.accumulator.set_count(settings.count());
        self.settings = settings;

        self.hook.release();
        self.arm_hook();

        self.emit(Notification::Count(self.accumulator.count()));
        self.emit(Notification::Paused(self.settings.paused()));
    }

    fn handle_control(&mut self, op: ControlOp) -> ControlFlow<()> {
        debug!(?op, "control");
        match op {
            ControlOp::Increment => self.adjust(1),
            ControlOp::Decrement => self.adjust(-1),
            ControlOp::SetCount(count) => {
                self.accumulator.set_count(count);
                self.emit(Notification::Count(count));
            }
            ControlOp::TogglePause => {
                self.settings = self.settings.with_paused(!self.settings.paused());
                self.emit(Notification::Paused(self.settings.paused()));
            }
            ControlOp::Stop => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    fn adjust(&mut self, delta: i64) {
        if let Some(count) = self.accumulator.adjust(delta, self.settings.paused()) {
            self.emit(Notification::Count(count));
        }
    }

    fn arm_hook(&mut self) {
        if self.hook_degraded {
            return;
        }
        let tracked = *self.settings.tracked();
        match self.hook.arm(&tracked) {
            Ok(()) => self.emit(Notification::Status(Status::Tracking(tracked))),
            Err(e) => {
                warn!(error = %e, "input hook unavailable, running with controls only");
                self.hook_degraded = true;
                self.emit(Notification::Status(Status::HookUnavailable {
                    reason: e.to_string(),
                }));
            }
        }
    }

    fn emit(&self, notification: Notification) {
        // A closed display is not an error for the pump.
        let _ = self.notify.send(notification);
    }

    /// Runs until [`ControlOp::Stop`] arrives or every handle is dropped.
    /// Returns the final settings snapshot.
    pub async fn run(mut self, mut rx: mpsc::UnboundedReceiver<PumpMessage>) -> Settings {
        self.start();
        while let Some(msg) = rx.recv().await {
            if self.handle_message(msg).is_break() {
                break;
            }
        }
        rx.close();
        self.shutdown();
        self.snapshot()
    }
}

impl<H: InputHook + 'static> EventPump<H> {
    /// Spawns the pump on the current tokio runtime.
    pub fn spawn(
        draft: SettingsDraft,
        hook: H,
    ) -> (
        PumpHandle,
        mpsc::UnboundedReceiver<Notification>,
        JoinHandle<Settings>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (notify_tx, notify_rx) = mpsc::unbounded_channel();
        let pump = Self::new(draft, hook, notify_tx);
        let task = tokio::spawn(pump.run(rx));
        (PumpHandle { tx }, notify_rx, task)
    }
}
