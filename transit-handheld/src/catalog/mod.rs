//! Remote catalog client.
//!
//! Talks to the transit backend over a [`Transport`]: three catalog
//! endpoints (routes, trips per route, stations), the user-location POST
//! that picks a station, and the plain-text status feed.
//!
//! The transport is a seam: [`ReqwestTransport`] does real HTTP, while
//! [`MockTransport`] serves canned replies for tests and the simulator.

mod client;
mod error;
mod http;
mod mock;
mod transport;
mod types;

pub use client::{CatalogClient, paths};
pub use error::{CatalogError, TransportError};
pub use http::ReqwestTransport;
pub use mock::{MockTransport, Reply, RecordedRequest};
pub use transport::{HttpResponse, Method, Transport};
pub use types::{RouteDto, StationDto, TripDto};
