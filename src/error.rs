//! Error types for SnapKV
//!
//! Provides a unified error type for all store operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using SnapError
pub type Result<T> = std::result::Result<T, SnapError>;

/// Unified error type for SnapKV operations
#[derive(Debug, Error)]
pub enum SnapError {
    // -------------------------------------------------------------------------
    // File Errors
    // -------------------------------------------------------------------------
    /// The backing file (or its parent directory) could not be opened/created
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure while loading the snapshot
    #[error("Read error: {0}")]
    Read(#[source] std::io::Error),

    /// I/O failure during the truncate/seek/write sequence
    #[error("Persist error: {0}")]
    Persist(#[source] std::io::Error),

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    /// Snapshot bytes are malformed or do not match the expected types
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// A key or value cannot be represented in the chosen format
    #[error("Encoding error: {0}")]
    Encoding(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SnapError {
    /// True for errors raised by a codec (either direction)
    pub fn is_codec(&self) -> bool {
        matches!(self, SnapError::Decoding(_) | SnapError::Encoding(_))
    }
}
