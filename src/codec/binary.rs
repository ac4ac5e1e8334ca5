//! Binary codec
//!
//! bincode with fixed-width little-endian integers. Trailing bytes after
//! a complete snapshot are rejected, so stale data left behind by a
//! non-truncating write surfaces as a decoding error.

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, SnapError};

use super::{Cache, Codec};

/// Compact binary snapshot codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BinaryCodec;

impl BinaryCodec {
    fn options() -> impl Options {
        bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .with_little_endian()
            .reject_trailing_bytes()
    }
}

impl Codec for BinaryCodec {
    fn name(&self) -> &'static str {
        "binary"
    }

    fn encode<K, V>(&self, cache: &Cache<K, V>) -> Result<Vec<u8>>
    where
        K: Serialize + Ord,
        V: Serialize,
    {
        Self::options()
            .serialize(cache)
            .map_err(|e| SnapError::Encoding(e.to_string()))
    }

    fn decode<K, V>(&self, bytes: &[u8]) -> Result<Cache<K, V>>
    where
        K: DeserializeOwned + Ord,
        V: DeserializeOwned,
    {
        if bytes.is_empty() {
            return Ok(Cache::new());
        }

        Self::options()
            .deserialize(bytes)
            .map_err(|e| SnapError::Decoding(e.to_string()))
    }
}
