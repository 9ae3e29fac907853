//! SELECT hold classification.
//!
//! One press-release cycle moves through
//! `Idle -> Pressed -> (PopupShown) -> (Handled) -> Idle`. While held, the
//! elapsed time is checked against three thresholds with the precedence
//! clear > long > popup. Each action fires at most once per cycle; the
//! countdown popup is redrawn at a limited cadence until the clear fires.

use tracing::debug;

use crate::config::GestureConfig;

/// Where the current press cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pressed,
    /// The countdown popup is on screen and nothing has fired yet.
    PopupShown,
    /// A hold action fired; the release will not count as a tap.
    Handled,
}

/// Something a continued hold asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldAction {
    ClearCaches,
    ReturnToRoutes,
    /// Draw (or refresh) the countdown popup.
    Countdown { remaining_ms: u64 },
}

/// What a release means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// Short press: select.
    Tap,
    /// The popup was up and no clear happened: erase it.
    Abort,
    /// A hold action already consumed the cycle.
    Consumed,
}

/// Per-cycle state of the SELECT button.
#[derive(Debug, Clone)]
pub struct SelectGesture {
    config: GestureConfig,
    pressed: bool,
    start_ms: u64,
    long_handled: bool,
    clear_handled: bool,
    popup_shown: bool,
    last_popup_ms: Option<u64>,
}

impl SelectGesture {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            pressed: false,
            start_ms: 0,
            long_handled: false,
            clear_handled: false,
            popup_shown: false,
            last_popup_ms: None,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn phase(&self) -> Phase {
        if !self.pressed {
            Phase::Idle
        } else if self.long_handled || self.clear_handled {
            Phase::Handled
        } else if self.popup_shown {
            Phase::PopupShown
        } else {
            Phase::Pressed
        }
    }

    /// Start a cycle at the press edge.
    pub fn press(&mut self, now_ms: u64) {
        self.pressed = true;
        self.start_ms = now_ms;
        self.long_handled = false;
        self.clear_handled = false;
        self.popup_shown = false;
        self.last_popup_ms = None;
    }

    /// Check the thresholds while the button stays down.
    pub fn hold(&mut self, now_ms: u64) -> Option<HoldAction> {
        if !self.pressed {
            return None;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);

        if !self.clear_handled && elapsed >= self.config.clear_press_ms {
            self.clear_handled = true;
            self.long_handled = true;
            debug!(elapsed, "SELECT hold: clear caches");
            return Some(HoldAction::ClearCaches);
        }

        if !self.long_handled && elapsed >= self.config.long_press_ms {
            self.long_handled = true;
            debug!(elapsed, "SELECT hold: return to routes");
            return Some(HoldAction::ReturnToRoutes);
        }

        let refresh_due = self
            .last_popup_ms
            .is_none_or(|last| now_ms.saturating_sub(last) >= self.config.popup_refresh_ms);
        if !self.clear_handled && elapsed >= self.config.popup_delay_ms && refresh_due {
            self.popup_shown = true;
            self.last_popup_ms = Some(now_ms);
            return Some(HoldAction::Countdown {
                remaining_ms: self.config.clear_press_ms.saturating_sub(elapsed),
            });
        }

        None
    }

    /// End the cycle at the release edge.
    pub fn release(&mut self) -> Release {
        if !self.pressed {
            return Release::Consumed;
        }
        self.pressed = false;

        let outcome = if self.popup_shown && !self.clear_handled {
            Release::Abort
        } else if self.long_handled || self.popup_shown {
            Release::Consumed
        } else {
            Release::Tap
        };
        debug!(?outcome, "SELECT released");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gesture() -> SelectGesture {
        SelectGesture::new(GestureConfig::default())
    }

    /// Sample every 50 ms from `from` to `to` inclusive, collecting actions.
    fn hold_between(g: &mut SelectGesture, from: u64, to: u64) -> Vec<(u64, HoldAction)> {
        (from..=to)
            .step_by(50)
            .filter_map(|t| g.hold(t).map(|a| (t, a)))
            .collect()
    }

    #[test]
    fn quick_tap() {
        let mut g = gesture();
        g.press(0);
        assert_eq!(g.phase(), Phase::Pressed);
        assert!(hold_between(&mut g, 50, 300).is_empty());
        assert_eq!(g.release(), Release::Tap);
        assert_eq!(g.phase(), Phase::Idle);
    }

    #[test]
    fn long_press_fires_once() {
        let mut g = gesture();
        g.press(1_000);
        let actions = hold_between(&mut g, 1_050, 1_950);
        assert_eq!(actions, vec![(1_800, HoldAction::ReturnToRoutes)]);
        assert_eq!(g.phase(), Phase::Handled);
        assert_eq!(g.release(), Release::Consumed);
    }

    #[test]
    fn popup_refresh_is_rate_limited() {
        let mut g = gesture();
        g.press(0);
        let countdowns: Vec<(u64, u64)> = hold_between(&mut g, 50, 1_650)
            .into_iter()
            .filter_map(|(t, a)| match a {
                HoldAction::Countdown { remaining_ms } => Some((t, remaining_ms)),
                _ => None,
            })
            .collect();
        assert_eq!(
            countdowns,
            vec![(1_000, 9_000), (1_200, 8_800), (1_400, 8_600), (1_600, 8_400)]
        );
    }

    #[test]
    fn release_after_popup_erases_it() {
        let mut g = gesture();
        g.press(0);
        hold_between(&mut g, 50, 1_100);
        assert_eq!(g.release(), Release::Abort);
    }

    #[test]
    fn clear_takes_precedence_and_fires_once() {
        let mut g = gesture();
        g.press(0);
        let actions = hold_between(&mut g, 50, 12_000);
        let clears = actions
            .iter()
            .filter(|(_, a)| *a == HoldAction::ClearCaches)
            .count();
        let longs = actions
            .iter()
            .filter(|(_, a)| *a == HoldAction::ReturnToRoutes)
            .count();
        assert_eq!(clears, 1);
        assert_eq!(longs, 1);
        assert!(actions.contains(&(10_000, HoldAction::ClearCaches)));
        // No countdown after the clear.
        assert!(actions.iter().all(|(t, a)| *t <= 10_000
            || !matches!(a, HoldAction::Countdown { .. })));
        assert_eq!(g.release(), Release::Consumed);
    }

    #[test]
    fn clear_wins_when_both_thresholds_pass_at_once() {
        let mut g = gesture();
        g.press(0);
        assert_eq!(g.hold(20_000), Some(HoldAction::ClearCaches));
        assert_eq!(g.hold(20_050), None);
    }

    #[test]
    fn early_popup_config_matches_countdown_scenario() {
        let config = GestureConfig::default()
            .with_popup_delay(500)
            .with_long_press(2_000);
        let mut g = SelectGesture::new(config);
        g.press(0);
        let last_countdown = hold_between(&mut g, 50, 900)
            .into_iter()
            .filter_map(|(_, a)| match a {
                HoldAction::Countdown { remaining_ms } => Some(remaining_ms),
                _ => None,
            })
            .last();
        assert_eq!(last_countdown, Some(9_100));
        assert_eq!(g.phase(), Phase::PopupShown);
        assert_eq!(g.release(), Release::Abort);
    }

    #[test]
    fn new_press_resets_flags() {
        let mut g = gesture();
        g.press(0);
        g.hold(900);
        g.release();

        g.press(5_000);
        assert_eq!(g.phase(), Phase::Pressed);
        assert_eq!(g.hold(5_100), None);
        assert_eq!(g.release(), Release::Tap);
    }
}
