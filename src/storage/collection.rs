//! Typed handle over one JSON collection document.

use serde::{Serialize, de::DeserializeOwned};
use std::{marker::PhantomData, sync::Arc};
use tokio::sync::{Mutex, MutexGuard};

use super::FileStore;
use crate::errors::{StoreError, StoreResult};

/// A named JSON array document of `T` records, read and written wholesale.
///
/// Cloned handles share the same write lock, so every mutation path for one
/// document is serialized no matter which clone it goes through.
pub struct Collection<T> {
    store: Arc<dyn FileStore>,
    name: String,
    write_lock: Arc<Mutex<()>>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            name: self.name.clone(),
            write_lock: self.write_lock.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.name)
            .field("store", &self.store)
            .finish()
    }
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new<N: Into<String>>(store: Arc<dyn FileStore>, name: N) -> Self {
        Self {
            store,
            name: name.into(),
            write_lock: Arc::new(Mutex::new(())),
            _record: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The underlying store, for asset operations tied to this collection
    pub fn store(&self) -> &Arc<dyn FileStore> {
        &self.store
    }

    /// Acquire the read-modify-write guard for this document.
    ///
    /// Hold it from the [`Collection::load`] that starts a mutation until the
    /// [`Collection::save`] that ends it.
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Read and parse the whole collection
    pub async fn load(&self) -> StoreResult<Vec<T>> {
        let bytes = self.store.read_document(&self.name).await?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
            document: self.name.clone(),
            source,
        })
    }

    /// Serialize and overwrite the whole collection
    pub async fn save(&self, records: &[T]) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(records)?;
        self.store.write_document(&self.name, &bytes).await
    }

    /// Seed the document with an empty array if it does not exist yet.
    pub async fn ensure(&self) -> StoreResult<bool> {
        self.store.ensure_document(&self.name, b"[]").await
    }
}
