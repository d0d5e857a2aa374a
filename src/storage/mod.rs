//! Raw persistence for JSON collection documents and image assets
//!
//! The [`FileStore`] trait is the seam between the resource managers and the
//! filesystem. Managers never touch paths directly: they receive a store at
//! construction, wrapped in a typed [`Collection`] handle per document.
//!
//! # Layout
//!
//! - **Documents** live in the files directory, one JSON array per resource
//!   type (`products.json`, `carts.json`).
//! - **Assets** live in the images directory and are referenced by bare file
//!   name only.

use async_trait::async_trait;

use crate::errors::StoreResult;

pub mod collection;
pub mod json_store;
pub mod security;

pub use collection::Collection;
pub use json_store::JsonFileStore;

/// Document and asset persistence
///
/// Implementations must make [`FileStore::write_document`] replace the whole
/// document in one step, so concurrent readers see either the old or the new
/// contents and never a partial write.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug {
    /// Read the raw bytes of the named document
    async fn read_document(&self, name: &str) -> StoreResult<Vec<u8>>;

    /// Overwrite the named document with `contents`
    async fn write_document(&self, name: &str, contents: &[u8]) -> StoreResult<()>;

    /// Create the named document with `initial` contents if it does not exist.
    ///
    /// Returns `true` when the document was created.
    async fn ensure_document(&self, name: &str, initial: &[u8]) -> StoreResult<bool>;

    /// Write an uploaded asset into the asset directory
    async fn save_asset(&self, filename: &str, contents: &[u8]) -> StoreResult<()>;

    /// Remove an asset from the asset directory
    async fn delete_asset(&self, filename: &str) -> StoreResult<()>;
}
