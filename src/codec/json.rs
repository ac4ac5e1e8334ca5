//! JSON codec
//!
//! Human-readable snapshots via serde_json. JSON objects only have string
//! keys; serde_json maps integer keys to their decimal text and back, and
//! refuses anything else (tuples, structs) with an encoding error.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, SnapError};

use super::{Cache, Codec};

/// Textual snapshot codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    /// Single-line output
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Indented output, easier to inspect by hand
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl Codec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn encode<K, V>(&self, cache: &Cache<K, V>) -> Result<Vec<u8>>
    where
        K: Serialize + Ord,
        V: Serialize,
    {
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(cache)
        } else {
            serde_json::to_vec(cache)
        };
        encoded.map_err(|e| SnapError::Encoding(e.to_string()))
    }

    fn decode<K, V>(&self, bytes: &[u8]) -> Result<Cache<K, V>>
    where
        K: DeserializeOwned + Ord,
        V: DeserializeOwned,
    {
        if bytes.is_empty() {
            return Ok(Cache::new());
        }

        serde_json::from_slice(bytes).map_err(|e| SnapError::Decoding(e.to_string()))
    }
}
