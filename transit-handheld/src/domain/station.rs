//! Stations along the selected trip.

use serde::{Deserialize, Serialize};

/// A stop, ordered by its 1-based position in the trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// 1-based position in the trip; also the on-screen counter numerator.
    pub sequence: i32,

    pub name: String,

    pub lat: f64,

    pub lon: f64,

    #[serde(rename = "hasVehicle", deserialize_with = "super::deserialize_flag")]
    pub has_vehicle: bool,
}

impl Station {
    /// Latitude with the six decimals the backend expects.
    pub fn lat_text(&self) -> String {
        format!("{:.6}", self.lat)
    }

    /// Longitude with the six decimals the backend expects.
    pub fn lon_text(&self) -> String {
        format!("{:.6}", self.lon)
    }
}
