//! Button presses delivered over a channel.
//!
//! Used by the desk simulator (a stdin thread sends presses) and by tests.
//! Each [`Press`] holds its button low for its duration, measured on the
//! device clock, then releases it for at least one sample before the next
//! press starts.

use std::sync::mpsc::{Receiver, TryRecvError};

use tracing::debug;

use crate::clock::Clock;

use super::buttons::{Button, InputPins};

/// Duration of a tap.
pub const TAP_MS: u64 = 100;

/// One scripted press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Press {
    pub button: Button,
    pub hold_ms: u64,
}

impl Press {
    pub fn tap(button: Button) -> Self {
        Self {
            button,
            hold_ms: TAP_MS,
        }
    }

    pub fn hold(button: Button, hold_ms: u64) -> Self {
        Self { button, hold_ms }
    }
}

/// [`InputPins`] fed from a channel of [`Press`]es.
#[derive(Debug)]
pub struct ScriptedPins<C> {
    presses: Receiver<Press>,
    clock: C,
    active: Option<(Press, u64)>,
    disconnected: bool,
}

impl<C: Clock> ScriptedPins<C> {
    pub fn new(presses: Receiver<Press>, clock: C) -> Self {
        Self {
            presses,
            clock,
            active: None,
            disconnected: false,
        }
    }

    fn refresh(&mut self) {
        let now = self.clock.now_ms();

        if let Some((press, started)) = self.active {
            if now.saturating_sub(started) >= press.hold_ms {
                debug!(button = %press.button, held = now - started, "scripted release");
                self.active = None;
            }
            // A finished press leaves the pin high for this sample.
            return;
        }

        if self.disconnected {
            return;
        }
        match self.presses.try_recv() {
            Ok(press) => {
                debug!(button = %press.button, hold_ms = press.hold_ms, "scripted press");
                self.active = Some((press, now));
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => self.disconnected = true,
        }
    }
}

impl<C: Clock> InputPins for ScriptedPins<C> {
    fn is_low(&mut self, button: Button) -> bool {
        self.refresh();
        self.active
            .is_some_and(|(press, _)| press.button == button)
    }

    fn is_live(&self) -> bool {
        !self.disconnected || self.active.is_some()
    }
}
