//! Screen navigation.
//!
//! The device shows one of four screens: routes, trips of the selected
//! route, stations of the tracked trip, and the live status line. Entering
//! a list screen tries the local cache first and falls back to the backend;
//! a successful network load is written back to the cache. Loading an
//! upstream collection always invalidates everything below it.
//!
//! [`NavigationController`] owns the single [`NavigationState`] and turns
//! input events into transitions and [`View`]s for the presenter.

mod controller;
mod fault;
mod state;
mod view;

pub use controller::{NavigationController, Polled, Source};
pub use fault::Fault;
pub use state::{NavigationState, Screen, StatusPoll};
pub use view::{Tone, View};
