//! Transit handheld controller.
//!
//! A two-button appliance that drills down from routes to trips to
//! stations, tells the backend where the user is waiting, then shows the
//! live status of the approaching vehicle. Fetched lists are cached in a
//! small persistent store so navigation keeps working without a round trip
//! on every step.

pub mod cache;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod device;
pub mod domain;
pub mod input;
pub mod nav;
pub mod store;
pub mod ui;
