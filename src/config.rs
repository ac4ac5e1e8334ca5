//! Configuration for SnapKV
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::codec::{Format, JsonCodec, SnapshotCodec};
use crate::error::{Result, SnapError};

/// Main configuration for a SnapKV store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // File Configuration
    // -------------------------------------------------------------------------
    /// Path of the single backing file holding the snapshot
    pub path: PathBuf,

    /// Create missing parent directories before opening the file
    pub create_dirs: bool,

    // -------------------------------------------------------------------------
    // Codec Configuration
    // -------------------------------------------------------------------------
    /// Wire format of the snapshot (fixed for the lifetime of the file)
    pub format: Format,

    /// Pretty-print JSON snapshots (ignored for the binary format)
    pub json_pretty: bool,

    // -------------------------------------------------------------------------
    // Durability Configuration
    // -------------------------------------------------------------------------
    /// How hard `persist()` pushes bytes to disk
    pub sync_strategy: SyncStrategy,
}

/// Persist sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// fsync after every persist (safest, slowest)
    EveryPersist,

    /// Leave flushing to the OS page cache
    OsBuffered,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./snapkv.dat"),
            create_dirs: false,
            format: Format::Binary,
            json_pretty: false,
            sync_strategy: SyncStrategy::EveryPersist,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Codec matching `format` and `json_pretty`
    pub fn codec(&self) -> SnapshotCodec {
        match self.format {
            Format::Json if self.json_pretty => SnapshotCodec::Json(JsonCodec::pretty()),
            format => SnapshotCodec::from(format),
        }
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing file path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Create missing parent directories on open
    pub fn create_dirs(mut self, enabled: bool) -> Self {
        self.config.create_dirs = enabled;
        self
    }

    /// Set the snapshot format
    pub fn format(mut self, format: Format) -> Self {
        self.config.format = format;
        self
    }

    /// Pretty-print JSON snapshots
    pub fn json_pretty(mut self, enabled: bool) -> Self {
        self.config.json_pretty = enabled;
        self
    }

    /// Set the persist sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    pub fn build(self) -> Result<Config> {
        if self.config.path.as_os_str().is_empty() {
            return Err(SnapError::Config("path must not be empty".to_string()));
        }
        Ok(self.config)
    }
}
