//! Codec Module
//!
//! Converts the whole cache to a snapshot byte sequence and back.
//!
//! ## Formats
//! - `Binary`: bincode, fixed-width little-endian integers. Compact and
//!   faithful to Rust types, not human-readable.
//! - `Json`: serde_json. Human-inspectable; map keys must serialize as
//!   strings or integers.
//!
//! ## Snapshot Layout
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ encode(cache)                           │
//! │   (no header, no version, no length     │
//! │    prefix beyond what the format adds)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! An empty byte sequence always decodes to an empty cache: that is a
//! file which has never been persisted.

mod binary;
mod json;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, SnapError};

pub use binary::BinaryCodec;
pub use json::JsonCodec;

/// The full in-memory mapping owned by a store
///
/// Ordered so that encoding is deterministic across processes.
pub type Cache<K, V> = BTreeMap<K, V>;

/// Serialization strategy for a whole cache
pub trait Codec {
    /// Short format name (for logging)
    fn name(&self) -> &'static str;

    /// Encode the full mapping
    fn encode<K, V>(&self, cache: &Cache<K, V>) -> Result<Vec<u8>>
    where
        K: Serialize + Ord,
        V: Serialize;

    /// Decode a full mapping; empty input yields an empty mapping
    fn decode<K, V>(&self, bytes: &[u8]) -> Result<Cache<K, V>>
    where
        K: DeserializeOwned + Ord,
        V: DeserializeOwned;
}

/// Snapshot format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Binary,
    Json,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Binary => "binary",
            Format::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = SnapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "binary" | "bin" | "bincode" => Ok(Format::Binary),
            "json" => Ok(Format::Json),
            other => Err(SnapError::Config(format!("Unknown format: {}", other))),
        }
    }
}

/// A concrete codec picked at runtime (from config or a CLI flag)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotCodec {
    Binary(BinaryCodec),
    Json(JsonCodec),
}

impl SnapshotCodec {
    pub fn format(&self) -> Format {
        match self {
            SnapshotCodec::Binary(_) => Format::Binary,
            SnapshotCodec::Json(_) => Format::Json,
        }
    }
}

impl From<Format> for SnapshotCodec {
    fn from(format: Format) -> Self {
        match format {
            Format::Binary => SnapshotCodec::Binary(BinaryCodec),
            Format::Json => SnapshotCodec::Json(JsonCodec::compact()),
        }
    }
}

impl From<BinaryCodec> for SnapshotCodec {
    fn from(codec: BinaryCodec) -> Self {
        SnapshotCodec::Binary(codec)
    }
}

impl From<JsonCodec> for SnapshotCodec {
    fn from(codec: JsonCodec) -> Self {
        SnapshotCodec::Json(codec)
    }
}

impl Default for SnapshotCodec {
    fn default() -> Self {
        SnapshotCodec::from(Format::default())
    }
}

impl Codec for SnapshotCodec {
    fn name(&self) -> &'static str {
        match self {
            SnapshotCodec::Binary(c) => c.name(),
            SnapshotCodec::Json(c) => c.name(),
        }
    }

    fn encode<K, V>(&self, cache: &Cache<K, V>) -> Result<Vec<u8>>
    where
        K: Serialize + Ord,
        V: Serialize,
    {
        match self {
            SnapshotCodec::Binary(c) => c.encode(cache),
            SnapshotCodec::Json(c) => c.encode(cache),
        }
    }

    fn decode<K, V>(&self, bytes: &[u8]) -> Result<Cache<K, V>>
    where
        K: DeserializeOwned + Ord,
        V: DeserializeOwned,
    {
        match self {
            SnapshotCodec::Binary(c) => c.decode(bytes),
            SnapshotCodec::Json(c) => c.decode(bytes),
        }
    }
}
