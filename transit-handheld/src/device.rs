//! The control loop.
//!
//! One thread samples the buttons, applies the resulting events to the
//! controller, and polls the status screen, then sleeps for a tick. Network
//! and store calls block the loop while they run; buttons are not sampled
//! meanwhile.

use tracing::{info, warn};

use crate::catalog::Transport;
use crate::clock::Clock;
use crate::config::GestureConfig;
use crate::input::{InputInterpreter, InputPins};
use crate::nav::{NavigationController, Polled};
use crate::store::BlobStore;
use crate::ui::Presenter;

/// What one loop iteration did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// The link was down; the loop backed off without touching the state.
    Offline,
    /// Inputs were processed (possibly none).
    Ran { events: usize, status: Polled },
}

/// The appliance: controller, interpreter and buttons.
pub struct Device<T, S, P, C, I> {
    controller: NavigationController<T, S, P, C>,
    interpreter: InputInterpreter,
    pins: I,
    tick_ms: u64,
    offline_backoff_ms: u64,
}

impl<T, S, P, C, I> Device<T, S, P, C, I>
where
    T: Transport,
    S: BlobStore,
    P: Presenter,
    C: Clock,
    I: InputPins,
{
    pub fn new(
        controller: NavigationController<T, S, P, C>,
        pins: I,
        gesture: GestureConfig,
    ) -> Self {
        Self {
            controller,
            interpreter: InputInterpreter::new(gesture),
            pins,
            tick_ms: crate::config::TICK_MS,
            offline_backoff_ms: crate::config::OFFLINE_BACKOFF_MS,
        }
    }

    /// Set the loop period and the offline back-off.
    pub fn with_timing(mut self, tick_ms: u64, offline_backoff_ms: u64) -> Self {
        self.tick_ms = tick_ms;
        self.offline_backoff_ms = offline_backoff_ms;
        self
    }

    pub fn controller(&self) -> &NavigationController<T, S, P, C> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut NavigationController<T, S, P, C> {
        &mut self.controller
    }

    pub fn pins_mut(&mut self) -> &mut I {
        &mut self.pins
    }

    /// Boot: show the route list.
    pub fn start(&mut self) {
        info!("device starting");
        if let Err(fault) = self.controller.enter_routes() {
            warn!(%fault, "initial route load failed");
        }
    }

    /// One loop iteration, without the trailing sleep.
    pub fn tick(&mut self) -> Tick {
        if !self.controller.link_up() {
            warn!(backoff_ms = self.offline_backoff_ms, "network down, backing off");
            self.controller.clock().sleep_ms(self.offline_backoff_ms);
            return Tick::Offline;
        }

        let now = self.controller.clock().now_ms();
        let events = self.interpreter.poll(now, &mut self.pins);
        for event in &events {
            if let Err(fault) = self.controller.handle(*event) {
                warn!(?event, %fault, "input action failed");
            }
        }

        let now = self.controller.clock().now_ms();
        let status = self.controller.poll_status(now);
        Tick::Ran {
            events: events.len(),
            status,
        }
    }

    /// Boot, then run until the input source ends.
    pub fn run(&mut self) {
        self.start();
        while self.pins.is_live() {
            self.tick();
            self.controller.clock().sleep_ms(self.tick_ms);
        }
        info!("input closed, device stopping");
    }
}
