//! Local cache of fetched collections.
//!
//! Each collection is stored as a JSON array under its own key in the
//! [`BlobStore`](crate::store::BlobStore). Trip lists are keyed per route so
//! several routes can stay cached side by side. Nothing is ever evicted.
//!
//! Reads never fail loudly: a missing, unreadable, or malformed blob is a
//! cache miss, and the caller falls back to the network.

mod entity;
mod error;

pub use entity::{CacheKey, EntityCache};
pub use error::CacheError;
