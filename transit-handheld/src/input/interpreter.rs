//! Turns pin samples into navigation events.

use tracing::debug;

use crate::config::GestureConfig;

use super::buttons::{Button, InputPins};
use super::gesture::{HoldAction, Release, SelectGesture};

/// An interpreted input, ready for the navigation controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// NEXT tapped.
    Next,
    /// SELECT tapped.
    Select,
    /// SELECT held past the long-press threshold.
    ReturnToRoutes,
    /// SELECT held past the clear threshold.
    ClearCaches,
    /// Refresh the countdown popup.
    ClearCountdown { remaining_ms: u64 },
    /// Restore the current screen after the popup was abandoned.
    Redraw,
}

/// Debounces both buttons and classifies SELECT holds.
///
/// Accepted actions from either button share one debounce window. SELECT
/// is sampled before NEXT on every tick.
#[derive(Debug, Clone)]
pub struct InputInterpreter {
    config: GestureConfig,
    select: SelectGesture,
    last_accepted_ms: Option<u64>,
    next_blocked_until_ms: u64,
}

impl InputInterpreter {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            select: SelectGesture::new(config),
            last_accepted_ms: None,
            next_blocked_until_ms: 0,
        }
    }

    /// The SELECT gesture state.
    pub fn select_gesture(&self) -> &SelectGesture {
        &self.select
    }

    /// Sample the pins once and return the resulting events, in order.
    pub fn poll(&mut self, now_ms: u64, pins: &mut impl InputPins) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if pins.is_low(Button::Select) {
            if !self.select.is_pressed() {
                self.select.press(now_ms);
            } else if let Some(action) = self.select.hold(now_ms) {
                events.push(match action {
                    HoldAction::ClearCaches => {
                        self.last_accepted_ms = Some(now_ms);
                        InputEvent::ClearCaches
                    }
                    HoldAction::ReturnToRoutes => {
                        self.last_accepted_ms = Some(now_ms);
                        InputEvent::ReturnToRoutes
                    }
                    HoldAction::Countdown { remaining_ms } => {
                        InputEvent::ClearCountdown { remaining_ms }
                    }
                });
            }
        } else if self.select.is_pressed() {
            match self.select.release() {
                Release::Tap if self.debounce_elapsed(now_ms) => {
                    self.last_accepted_ms = Some(now_ms);
                    events.push(InputEvent::Select);
                }
                Release::Tap => debug!(now_ms, "SELECT tap inside debounce window"),
                Release::Abort => events.push(InputEvent::Redraw),
                Release::Consumed => {}
            }
        }

        if now_ms >= self.next_blocked_until_ms
            && self.debounce_elapsed(now_ms)
            && pins.is_low(Button::Next)
        {
            self.last_accepted_ms = Some(now_ms);
            self.next_blocked_until_ms = now_ms + self.config.next_dead_time_ms;
            events.push(InputEvent::Next);
        }

        events
    }

    fn debounce_elapsed(&self, now_ms: u64) -> bool {
        self.last_accepted_ms
            .is_none_or(|last| now_ms.saturating_sub(last) > self.config.debounce_ms)
    }
}
