//! Routes and route identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend identifier of a route. Stable across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(pub i32);

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A transit route as cached on the device.
///
/// Field names on the wire and in the persisted blob follow the GTFS
/// column names the backend uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    #[serde(rename = "route_id")]
    pub id: RouteId,

    #[serde(rename = "route_short_name")]
    pub short_name: String,

    #[serde(rename = "route_long_name")]
    pub long_name: String,

    /// GTFS `route_type` (0 = tram, 3 = bus, ...).
    #[serde(rename = "route_type")]
    pub category: i32,

    /// Whether a live vehicle is currently running on this route.
    #[serde(rename = "hasVehicle", deserialize_with = "super::deserialize_flag")]
    pub has_vehicle: bool,
}
