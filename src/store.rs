//! Store Module
//!
//! Owns the cache and the backing file, and keeps them in step.
//!
//! ## Responsibilities
//! - Open (or create) the backing file and load it into the cache
//! - Serve get/set/flush purely from memory
//! - Rewrite the whole file with a fresh snapshot on `persist()`
//!
//! ## Persist Sequence
//! ```text
//! encode(cache) ──► decode check ──► set_len(0) ──► seek(0) ──► write_all ──► flush/sync
//! ```
//! Truncating first is what keeps a shorter snapshot from leaving the tail
//! of a longer previous one behind in the file.

use std::borrow::Borrow;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::codec::{Cache, Codec, SnapshotCodec};
use crate::config::{Config, SyncStrategy};
use crate::error::{Result, SnapError};

/// A key-value store mirrored to a single snapshot file
///
/// ## Ownership
/// The store exclusively owns both the cache and the file handle. All
/// operations take `&self`/`&mut self` and run to completion on the calling
/// thread; wrap the store in [`crate::SharedStore`] to call it from several
/// threads.
///
/// ## File Handle
/// Acquired in `open()`, released by `close()` or on drop.
pub struct Store<K, V, C = SnapshotCodec> {
    /// Path of the backing file
    path: PathBuf,

    /// Open read/write handle to the backing file
    file: File,

    /// In-memory mapping, the source of truth while the process runs
    cache: Cache<K, V>,

    /// Snapshot codec (fixed for the lifetime of the file)
    codec: C,

    /// How hard `persist()` pushes bytes to disk
    sync_strategy: SyncStrategy,
}

impl<K, V, C> Store<K, V, C>
where
    K: Ord + Serialize + DeserializeOwned,
    V: Serialize + DeserializeOwned,
    C: Codec,
{
    /// Open or create the file at `path` and load its snapshot
    ///
    /// On startup:
    /// 1. Open/create the file for read/write
    /// 2. Read its entire content
    /// 3. Decode into the cache (empty file → empty cache)
    ///
    /// `codec` may be anything convertible into the store's codec, so a
    /// `Store<K, V>` accepts a plain [`crate::Format`].
    pub fn open(path: impl AsRef<Path>, codec: impl Into<C>) -> Result<Self> {
        Self::open_inner(path.as_ref(), codec.into(), SyncStrategy::EveryPersist)
    }

    fn open_inner(path: &Path, codec: C, sync_strategy: SyncStrategy) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|source| SnapError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        let mut store = Self {
            path: path.to_path_buf(),
            file,
            cache: Cache::new(),
            codec,
            sync_strategy,
        };

        // On failure the store (and its file handle) is dropped here
        store.read()?;

        debug!(
            path = %store.path.display(),
            format = store.codec.name(),
            entries = store.cache.len(),
            "opened store"
        );

        Ok(store)
    }

    /// Reload the cache from the backing file
    ///
    /// Always reloads the whole file: the cursor is rewound to offset 0
    /// first, whatever a previous `persist()` left it at. Zero bytes is the
    /// never-persisted case and yields an empty cache. The cache is only
    /// replaced once decoding has succeeded.
    ///
    /// ## Errors
    /// - `SnapError::Read` on an I/O failure while rewinding or reading
    /// - `SnapError::Decoding` if the content is malformed or does not
    ///   match `K`/`V`
    pub fn read(&mut self) -> Result<()> {
        self.file.seek(SeekFrom::Start(0)).map_err(SnapError::Read)?;

        let mut bytes = Vec::new();
        self.file.read_to_end(&mut bytes).map_err(SnapError::Read)?;

        let cache: Cache<K, V> = self.codec.decode(&bytes).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "failed to decode snapshot");
            e
        })?;

        debug!(bytes = bytes.len(), entries = cache.len(), "read snapshot");
        self.cache = cache;
        Ok(())
    }

    /// Write the whole cache to the backing file, replacing its content
    ///
    /// Steps:
    /// 1. Encode, then decode the result back (on failure the file is
    ///    left untouched)
    /// 2. Truncate to zero length
    /// 3. Rewind the cursor
    /// 4. Write the new snapshot, then flush/sync
    ///
    /// ## Errors
    /// - `SnapError::Encoding` if a key or value cannot be represented, or
    ///   the encoded snapshot would not load again (e.g. NaN in JSON)
    /// - `SnapError::Persist` on an I/O failure during truncate/seek/write/sync
    pub fn persist(&mut self) -> Result<()> {
        let bytes = self.codec.encode(&self.cache)?;

        // Some formats encode lossily without error; never write a snapshot
        // that `open` would reject
        let _: Cache<K, V> = self.codec.decode(&bytes).map_err(|e| {
            SnapError::Encoding(format!("snapshot does not decode: {}", e))
        })?;

        self.file.set_len(0).map_err(SnapError::Persist)?;
        self.file.seek(SeekFrom::Start(0)).map_err(SnapError::Persist)?;
        self.file.write_all(&bytes).map_err(SnapError::Persist)?;
        self.file.flush().map_err(SnapError::Persist)?;

        if self.sync_strategy == SyncStrategy::EveryPersist {
            self.file.sync_all().map_err(SnapError::Persist)?;
        }

        debug!(bytes = bytes.len(), entries = self.cache.len(), "persisted snapshot");
        Ok(())
    }

    /// Sync outstanding data and release the file handle
    pub fn close(self) -> Result<()> {
        self.file.sync_all().map_err(SnapError::Persist)?;
        debug!(path = %self.path.display(), "closed store");
        Ok(())
    }
}

impl<K, V> Store<K, V, SnapshotCodec>
where
    K: Ord + Serialize + DeserializeOwned,
    V: Serialize + DeserializeOwned,
{
    /// Open a store as described by `config`
    pub fn open_with_config(config: &Config) -> Result<Self> {
        if config.create_dirs {
            if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|source| SnapError::Open {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        Self::open_inner(&config.path, config.codec(), config.sync_strategy)
    }
}

impl<K: Ord, V, C> Store<K, V, C> {
    /// Look up a key in the cache
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.cache.get(key)
    }

    /// Look up a key, yielding `(V::default(), false)` when absent
    pub fn get_or_default<Q>(&self, key: &Q) -> (V, bool)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        V: Clone + Default,
    {
        match self.cache.get(key) {
            Some(value) => (value.clone(), true),
            None => (V::default(), false),
        }
    }

    /// Insert or overwrite a value, returning the previous one
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        self.cache.insert(key, value)
    }

    /// Remove a key from the cache
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.cache.remove(key)
    }

    /// Discard every cached entry (the file is not touched)
    pub fn flush(&mut self) {
        self.cache = Cache::new();
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.cache.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.cache.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.cache.keys()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the codec
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Get the persist sync strategy
    pub fn sync_strategy(&self) -> SyncStrategy {
        self.sync_strategy
    }
}

impl<K, V, C> std::fmt::Debug for Store<K, V, C>
where
    C: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("path", &self.path)
            .field("entries", &self.cache.len())
            .field("codec", &self.codec)
            .field("sync_strategy", &self.sync_strategy)
            .finish()
    }
}
