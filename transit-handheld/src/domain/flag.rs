//! Lenient boolean decoding.
//!
//! The backend reports `hasVehicle` as a JSON integer while newer payloads
//! (and this crate's own cache blobs) carry a boolean. Both are accepted.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

/// Decode a flag from either `true`/`false` or an integer (non-zero = set).
pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
    })
}
