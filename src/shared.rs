//! Shared Store
//!
//! Thread-safe handle around a single [`Store`].
//!
//! ## Concurrency Model
//! - One `parking_lot::Mutex` serializes every call, reads included
//! - Cloning the handle shares the same store (`Arc`)
//! - Still exactly one open file handle; other processes writing the same
//!   path are not coordinated with

use std::borrow::Borrow;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::{Codec, SnapshotCodec};
use crate::error::Result;
use crate::store::Store;

/// Cloneable, lock-guarded store handle
pub struct SharedStore<K, V, C = SnapshotCodec> {
    inner: Arc<Mutex<Store<K, V, C>>>,
}

impl<K, V, C> Clone for SharedStore<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V, C> From<Store<K, V, C>> for SharedStore<K, V, C> {
    fn from(store: Store<K, V, C>) -> Self {
        Self::new(store)
    }
}

impl<K, V, C> SharedStore<K, V, C> {
    pub fn new(store: Store<K, V, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Lock the store for a sequence of calls that must not interleave
    pub fn lock(&self) -> MutexGuard<'_, Store<K, V, C>> {
        self.inner.lock()
    }

    /// Recover the store once every other handle has been dropped
    ///
    /// Returns `self` unchanged if other handles are still alive.
    pub fn try_unwrap(self) -> std::result::Result<Store<K, V, C>, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<K: Ord, V, C> SharedStore<K, V, C> {
    /// Look up a key, cloning the value out of the lock
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    pub fn set(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().set(key, value)
    }

    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.lock().remove(key)
    }

    pub fn flush(&self) {
        self.inner.lock().flush()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl<K, V, C> SharedStore<K, V, C>
where
    K: Ord + Serialize + DeserializeOwned,
    V: Serialize + DeserializeOwned,
    C: Codec,
{
    pub fn read(&self) -> Result<()> {
        self.inner.lock().read()
    }

    pub fn persist(&self) -> Result<()> {
        self.inner.lock().persist()
    }
}
