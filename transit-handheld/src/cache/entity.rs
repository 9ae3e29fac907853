//! Per-collection save and load on top of the blob store.

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::domain::{Route, RouteId, Station, Trip};
use crate::store::BlobStore;

use super::error::CacheError;

/// Store key of a cached collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Routes,
    Trips(RouteId),
    Stations,
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Routes => f.write_str("routes"),
            CacheKey::Trips(route) => write!(f, "trips_{route}"),
            CacheKey::Stations => f.write_str("stations"),
        }
    }
}

/// Typed cache of routes, trips and stations.
#[derive(Debug)]
pub struct EntityCache<S> {
    store: S,
}

impl<S: BlobStore> EntityCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying blob store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn load_routes(&self) -> Option<Vec<Route>> {
        self.load(CacheKey::Routes)
    }

    pub fn save_routes(&mut self, routes: &[Route]) -> Result<(), CacheError> {
        self.save(CacheKey::Routes, routes)
    }

    pub fn load_trips(&self, route: RouteId) -> Option<Vec<Trip>> {
        self.load(CacheKey::Trips(route))
    }

    pub fn save_trips(&mut self, route: RouteId, trips: &[Trip]) -> Result<(), CacheError> {
        self.save(CacheKey::Trips(route), trips)
    }

    pub fn load_stations(&self) -> Option<Vec<Station>> {
        self.load(CacheKey::Stations)
    }

    pub fn save_stations(&mut self, stations: &[Station]) -> Result<(), CacheError> {
        self.save(CacheKey::Stations, stations)
    }

    /// Erase every cached collection and commit the erase.
    pub fn clear(&mut self) -> Result<(), CacheError> {
        self.store.erase_all()?;
        self.store.commit()?;
        info!("cache cleared");
        Ok(())
    }

    /// Load a collection, turning every failure into a miss.
    ///
    /// Empty collections are treated as misses as well: an empty list is
    /// never worth showing instead of asking the backend again.
    pub fn load<T: DeserializeOwned>(&self, key: CacheKey) -> Option<Vec<T>> {
        match self.try_load(key) {
            Ok(items) if items.is_empty() => {
                debug!(%key, "cached collection is empty, treating as miss");
                None
            }
            Ok(items) => {
                debug!(%key, count = items.len(), "cache hit");
                Some(items)
            }
            Err(e) if e.is_miss() => {
                debug!(%key, "cache miss");
                None
            }
            Err(e) => {
                warn!(%key, error = %e, "unusable cache entry, falling back to network");
                None
            }
        }
    }

    /// Load a collection, reporting why it could not be read.
    pub fn try_load<T: DeserializeOwned>(&self, key: CacheKey) -> Result<Vec<T>, CacheError> {
        let name = key.to_string();

        // Size first, then read into an exactly sized buffer.
        let len = self.store.blob_len(&name)?;
        let mut buf = vec![0u8; len];
        let read = self.store.read_blob(&name, &mut buf)?;
        buf.truncate(read);

        serde_json::from_slice(&buf).map_err(|e| CacheError::Decode {
            key: name,
            message: e.to_string(),
        })
    }

    /// Serialize a collection, stage it and commit.
    pub fn save<T: Serialize>(&mut self, key: CacheKey, items: &[T]) -> Result<(), CacheError> {
        let name = key.to_string();
        let json = serde_json::to_vec(items).map_err(|e| CacheError::Encode {
            key: name.clone(),
            message: e.to_string(),
        })?;

        self.store.write_blob(&name, &json)?;
        self.store.commit()?;
        info!(%key, count = items.len(), bytes = json.len(), "saved collection");
        Ok(())
    }
}
