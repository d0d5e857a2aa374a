//! Shared fixtures for the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::TempDir;

use storefront::errors::{StoreError, StoreResult};
use storefront::models::Product;
use storefront::services::{CartManager, PRODUCTS_DOCUMENT, ProductManager};
use storefront::storage::{FileStore, JsonFileStore};

/// A [`JsonFileStore`] whose document writes can be made to fail on demand
#[derive(Debug)]
pub struct FlakyStore {
    inner: JsonFileStore,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl FileStore for FlakyStore {
    async fn read_document(&self, name: &str) -> StoreResult<Vec<u8>> {
        self.inner.read_document(name).await
    }

    async fn write_document(&self, name: &str, contents: &[u8]) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Write {
                path: PathBuf::from(name),
                source: std::io::Error::other("disk full"),
            });
        }
        self.inner.write_document(name, contents).await
    }

    async fn ensure_document(&self, name: &str, initial: &[u8]) -> StoreResult<bool> {
        self.inner.ensure_document(name, initial).await
    }

    async fn save_asset(&self, filename: &str, contents: &[u8]) -> StoreResult<()> {
        self.inner.save_asset(filename, contents).await
    }

    async fn delete_asset(&self, filename: &str) -> StoreResult<()> {
        self.inner.delete_asset(filename).await
    }
}

/// A seeded storage tree in a temporary directory
pub struct Fixture {
    pub dir: TempDir,
    pub store: Arc<FlakyStore>,
    pub products: ProductManager,
    pub carts: CartManager,
}

impl Fixture {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let inner = JsonFileStore::new(
            dir.path().join("files"),
            dir.path().join("public").join("images"),
        );
        inner.ensure_storage_dirs().await?;

        let store = Arc::new(FlakyStore {
            inner,
            fail_writes: AtomicBool::new(false),
        });
        let products = ProductManager::new(store.clone());
        let carts = CartManager::new(store.clone(), products.clone());
        products.collection().ensure().await?;
        carts.collection().ensure().await?;

        Ok(Self {
            dir,
            store,
            products,
            carts,
        })
    }

    pub fn public_dir(&self) -> PathBuf {
        self.dir.path().join("public")
    }

    pub fn images_dir(&self) -> PathBuf {
        self.public_dir().join("images")
    }

    pub fn image_path(&self, name: &str) -> PathBuf {
        self.images_dir().join(name)
    }

    /// Put an image on disk as the upload handler would
    pub fn write_image(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(self.image_path(name), b"\x89PNG fake image")
    }

    /// Replace the products document with `products`, writing their images too
    pub fn seed_products(&self, products: &[Product]) -> Result<(), Box<dyn std::error::Error>> {
        for product in products {
            self.write_image(&product.thumbnail)?;
        }
        let path = self.dir.path().join("files").join(PRODUCTS_DOCUMENT);
        std::fs::write(path, serde_json::to_vec_pretty(products)?)?;
        Ok(())
    }

    pub fn image_count(&self) -> usize {
        count_files(&self.images_dir())
    }
}

fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| entries.filter_map(Result::ok).count())
        .unwrap_or(0)
}

pub fn product(id: u64, title: &str, status: bool, stock: u64, thumbnail: &str) -> Product {
    Product {
        id,
        title: title.to_string(),
        status,
        stock,
        thumbnail: thumbnail.to_string(),
    }
}
