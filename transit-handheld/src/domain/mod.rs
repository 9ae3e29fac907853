//! Domain types for the transit handheld.
//!
//! Routes, trips and stations as the device keeps them in memory and in its
//! persistent store, plus the selectable [`Collection`] wrapper the
//! navigation screens page through.

mod collection;
mod flag;
mod route;
mod station;
mod trip;

pub use collection::{Collection, CollectionKind};
pub use route::{Route, RouteId};
pub use station::Station;
pub use trip::Trip;

pub(crate) use flag::deserialize as deserialize_flag;
