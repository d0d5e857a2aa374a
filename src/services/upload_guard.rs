//! Compensating cleanup for images written before a manager operation runs.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::errors::AppResult;
use crate::models::UploadedFile;
use crate::storage::FileStore;

/// Owns a pending upload until the operation that uses it settles.
///
/// [`UploadGuard::settle`] keeps the file when the operation succeeded and
/// deletes it when it failed. A guard dropped without settling (the request
/// future was cancelled, or a panic unwound through it) still removes the
/// file, from a spawned task.
#[derive(Debug)]
pub struct UploadGuard {
    store: Arc<dyn FileStore>,
    filename: Option<String>,
}

impl UploadGuard {
    pub fn new(store: Arc<dyn FileStore>, upload: Option<&UploadedFile>) -> Self {
        Self {
            store,
            filename: upload.map(|u| u.filename.clone()),
        }
    }

    /// Stop tracking the upload, leaving the file in place whatever happens
    pub fn disarm(&mut self) {
        self.filename = None;
    }

    /// Resolve the guard against the operation's outcome, returning it as-is.
    ///
    /// A failed cleanup is logged and never replaces the original error.
    pub async fn settle<T>(mut self, result: AppResult<T>) -> AppResult<T> {
        match &result {
            Ok(_) => {
                self.filename = None;
            }
            Err(e) => {
                if let Some(filename) = self.filename.take() {
                    debug!("Discarding upload {} after failed operation: {}", filename, e);
                    discard_asset(self.store.as_ref(), &filename).await;
                }
            }
        }
        result
    }
}

impl Drop for UploadGuard {
    fn drop(&mut self) {
        let Some(filename) = self.filename.take() else {
            return;
        };
        let store = self.store.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    discard_asset(store.as_ref(), &filename).await;
                });
            }
            Err(_) => warn!("Upload {} left behind: no runtime to clean it up", filename),
        }
    }
}

/// Best-effort asset removal: failures are logged, not returned.
pub async fn discard_asset(store: &dyn FileStore, filename: &str) {
    if let Err(e) = store.delete_asset(filename).await {
        warn!("Failed to remove asset {}: {}", filename, e);
    }
}
