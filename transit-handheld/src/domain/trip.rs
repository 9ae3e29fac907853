//! Trips along a route.

use serde::{Deserialize, Serialize};

use super::RouteId;

/// One direction of service on a route, identified by its backend trip id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    #[serde(rename = "trip_id")]
    pub id: String,

    /// The route this trip belongs to.
    pub route_id: RouteId,

    /// GTFS direction (0 or 1).
    #[serde(rename = "direction_id")]
    pub direction: u8,

    #[serde(rename = "trip_headsign")]
    pub headsign: String,
}
