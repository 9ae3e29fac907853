//! Backend response DTOs.
//!
//! These mirror the JSON the backend sends. They are more forgiving than the
//! domain types: optional columns default the way the device always treated
//! them, and `hasVehicle` may arrive as an integer.

use serde::Deserialize;

use crate::domain::{Route, RouteId, Station, Trip, deserialize_flag};

/// Element of `GET /api/routes-with-vehicles`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteDto {
    pub route_id: i32,

    #[serde(default)]
    pub route_short_name: Option<String>,

    #[serde(default)]
    pub route_long_name: Option<String>,

    #[serde(default)]
    pub route_type: Option<i32>,

    #[serde(rename = "hasVehicle", default, deserialize_with = "deserialize_flag")]
    pub has_vehicle: bool,
}

impl From<RouteDto> for Route {
    fn from(dto: RouteDto) -> Self {
        Route {
            id: RouteId(dto.route_id),
            short_name: dto.route_short_name.unwrap_or_default(),
            long_name: dto.route_long_name.unwrap_or_default(),
            category: dto.route_type.unwrap_or(0),
            has_vehicle: dto.has_vehicle,
        }
    }
}

/// Element of `GET /api/trips?routeId=<id>`.
#[derive(Debug, Clone, Deserialize)]
pub struct TripDto {
    pub trip_id: String,

    #[serde(default)]
    pub route_id: Option<i32>,

    #[serde(default)]
    pub direction_id: Option<u8>,

    #[serde(default)]
    pub trip_headsign: Option<String>,
}

impl TripDto {
    /// Convert, filling a missing route id with the route that was queried.
    pub fn into_trip(self, requested: RouteId) -> Trip {
        Trip {
            id: self.trip_id,
            route_id: self.route_id.map(RouteId).unwrap_or(requested),
            direction: self.direction_id.unwrap_or(0),
            headsign: self.trip_headsign.unwrap_or_default(),
        }
    }
}

/// Element of `GET /api/stations-with-vehicles`.
///
/// The backend calls the name `stationName`; the device normalises it to
/// `name`, which is also accepted here.
#[derive(Debug, Clone, Deserialize)]
pub struct StationDto {
    pub sequence: i32,

    #[serde(rename = "stationName", alias = "name")]
    pub station_name: String,

    pub lat: f64,

    pub lon: f64,

    #[serde(rename = "hasVehicle", default, deserialize_with = "deserialize_flag")]
    pub has_vehicle: bool,
}

impl From<StationDto> for Station {
    fn from(dto: StationDto) -> Self {
        Station {
            sequence: dto.sequence,
            name: dto.station_name,
            lat: dto.lat,
            lon: dto.lon,
            has_vehicle: dto.has_vehicle,
        }
    }
}
