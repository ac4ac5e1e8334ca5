//! # SnapKV
//!
//! A minimal embedded key-value store with:
//! - An in-memory ordered cache as the single source of truth
//! - Whole-file snapshot persistence (truncate, rewind, rewrite)
//! - Interchangeable binary (bincode) and JSON (serde_json) snapshots
//! - Load-on-open: the file is decoded into the cache at construction
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Caller                               │
//! │            get / set / flush  ·  read / persist              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                         Store                                │
//! │                (Cache: BTreeMap<K, V>)                        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ read / persist only
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Codec    │          │ Backing File│
//!   │ (bin/json)  │          │  (snapshot) │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use snapkv::{Format, Store};
//!
//! let mut store: Store<String, String> = Store::open("store.dat", Format::Json)?;
//! store.set("k".to_string(), "v".to_string());
//! store.persist()?;
//! # Ok::<(), snapkv::SnapError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod store;
pub mod shared;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{SnapError, Result};
pub use config::{Config, SyncStrategy};
pub use codec::{BinaryCodec, Cache, Codec, Format, JsonCodec, SnapshotCodec};
pub use store::Store;
pub use shared::SharedStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SnapKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
