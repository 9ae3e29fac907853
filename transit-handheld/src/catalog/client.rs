//! Typed requests against the transit backend.

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::{Route, RouteId, Station, Trip};

use super::error::CatalogError;
use super::transport::{Method, Transport};
use super::types::{RouteDto, StationDto, TripDto};

/// Endpoint paths, relative to the base URL.
pub mod paths {
    pub const ROUTES: &str = "/api/routes-with-vehicles";
    pub const TRIPS: &str = "/api/trips";
    pub const STATIONS: &str = "/api/stations-with-vehicles";
    pub const USER_LOCATION: &str = "/api/user-location";
    pub const STATUS: &str = "/api/status";
}

/// How much of an unparseable body to keep for diagnostics.
const BODY_EXCERPT_CHARS: usize = 500;

/// Client for the catalog, selection and status endpoints.
#[derive(Debug, Clone)]
pub struct CatalogClient<T> {
    transport: T,
    base_url: String,
}

impl<T: Transport> CatalogClient<T> {
    /// Create a client for `base_url` (scheme and host, optional path prefix).
    pub fn new(transport: T, base_url: impl Into<String>) -> Result<Self, CatalogError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| CatalogError::InvalidUrl {
            url: base_url.clone(),
            message: e.to_string(),
        })?;
        Ok(Self {
            transport,
            base_url,
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether the underlying link is up.
    pub fn is_online(&self) -> bool {
        self.transport.is_online()
    }

    /// Fetch the route catalog.
    pub fn fetch_routes(&self) -> Result<Vec<Route>, CatalogError> {
        let url = self.endpoint(paths::ROUTES, &[])?;
        let dtos: Vec<RouteDto> = self.get_json(&url)?;
        Ok(dtos.into_iter().map(Route::from).collect())
    }

    /// Fetch the trips that run on `route`.
    pub fn fetch_trips(&self, route: RouteId) -> Result<Vec<Trip>, CatalogError> {
        let url = self.endpoint(paths::TRIPS, &[("routeId", route.to_string())])?;
        let dtos: Vec<TripDto> = self.get_json(&url)?;
        Ok(dtos.into_iter().map(|dto| dto.into_trip(route)).collect())
    }

    /// Fetch the stations of the trip the backend currently tracks.
    pub fn fetch_stations(&self) -> Result<Vec<Station>, CatalogError> {
        let url = self.endpoint(paths::STATIONS, &[])?;
        let dtos: Vec<StationDto> = self.get_json(&url)?;
        Ok(dtos.into_iter().map(Station::from).collect())
    }

    /// Tell the backend the user is waiting at `station`.
    pub fn announce_location(&self, station: &Station) -> Result<(), CatalogError> {
        let url = self.user_location_url(station)?;
        let response = self.transport.send(Method::Post, &url)?;
        if !response.is_success() {
            warn!(status = response.status, "user-location rejected");
            return Err(CatalogError::Status {
                status: response.status,
                body: response.body,
            });
        }
        debug!(station = %station.name, "user location set");
        Ok(())
    }

    /// Fetch the current status line.
    pub fn fetch_status(&self) -> Result<String, CatalogError> {
        let url = self.endpoint(paths::STATUS, &[])?;
        self.get_text(&url)
    }

    /// URL of the user-location POST for `station`.
    ///
    /// Coordinates carry exactly six decimals; the name is form-encoded.
    pub fn user_location_url(&self, station: &Station) -> Result<Url, CatalogError> {
        self.endpoint(
            paths::USER_LOCATION,
            &[
                ("lat", station.lat_text()),
                ("lon", station.lon_text()),
                ("name", station.name.clone()),
            ],
        )
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, CatalogError> {
        let raw = format!("{}{}", self.base_url, path);
        let parsed = if query.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, query)
        };
        parsed.map_err(|e| CatalogError::InvalidUrl {
            url: raw,
            message: e.to_string(),
        })
    }

    fn get_text(&self, url: &Url) -> Result<String, CatalogError> {
        if !self.transport.is_online() {
            return Err(CatalogError::Offline);
        }

        let response = self.transport.send(Method::Get, url)?;
        if !response.is_success() {
            warn!(%url, status = response.status, "request failed");
            return Err(CatalogError::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response.body)
    }

    fn get_json<D: DeserializeOwned>(&self, url: &Url) -> Result<D, CatalogError> {
        let body = self.get_text(url)?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(%url, error = %e, "malformed payload");
            CatalogError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(BODY_EXCERPT_CHARS).collect()),
            }
        })
    }
}
