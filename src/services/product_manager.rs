//! Product persistence: validation, id assignment and thumbnail lifecycle.

use std::sync::Arc;
use tracing::{debug, info};

use super::upload_guard::{UploadGuard, discard_asset};
use crate::errors::{AppError, AppResult};
use crate::models::{FieldValue, Product, ProductInput, UploadedFile};
use crate::storage::{Collection, FileStore};
use crate::utils::{next_id, parse_id, position_of, to_boolean, to_stock};

/// Document name of the products collection
pub const PRODUCTS_DOCUMENT: &str = "products.json";

const RESOURCE: &str = "product";

/// Resource manager for the products collection
///
/// Every operation reloads the whole collection, acts on it and, for
/// mutations, writes it back while holding the collection's write lock. An
/// uploaded thumbnail is either referenced by the committed record or removed.
#[derive(Debug, Clone)]
pub struct ProductManager {
    products: Collection<Product>,
}

impl ProductManager {
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self {
            products: Collection::new(store, PRODUCTS_DOCUMENT),
        }
    }

    /// The collection handle backing this manager
    pub fn collection(&self) -> &Collection<Product> {
        &self.products
    }

    /// All products in insertion order
    pub async fn get_all(&self) -> AppResult<Vec<Product>> {
        let products = self.products.load().await?;
        debug!("Loaded {} products", products.len());
        Ok(products)
    }

    /// The product whose id equals the numeric reading of `id`
    pub async fn get_one_by_id(&self, id: &str) -> AppResult<Product> {
        let products = self.products.load().await?;
        let (index, _) = locate(&products, id)?;
        Ok(products[index].clone())
    }

    /// Create a product referencing an already-written thumbnail upload.
    ///
    /// The upload is deleted if validation or persistence fails.
    pub async fn insert_one(
        &self,
        data: ProductInput,
        upload: Option<UploadedFile>,
    ) -> AppResult<Product> {
        let guard = UploadGuard::new(self.products.store().clone(), upload.as_ref());
        let result = self.try_insert(data, upload.as_ref()).await;
        guard.settle(result).await
    }

    /// Replace the supplied fields of an existing product.
    ///
    /// Absent fields keep their stored values. A new upload replaces the
    /// thumbnail and the previous image is removed once the write succeeds;
    /// on failure the new upload is removed instead.
    pub async fn update_one_by_id(
        &self,
        id: &str,
        data: ProductInput,
        upload: Option<UploadedFile>,
    ) -> AppResult<Product> {
        let mut guard = UploadGuard::new(self.products.store().clone(), upload.as_ref());
        let result = self.try_update(id, data, upload.as_ref(), &mut guard).await;
        guard.settle(result).await
    }

    /// Remove a product and its thumbnail
    pub async fn delete_one_by_id(&self, id: &str) -> AppResult<()> {
        let _guard = self.products.lock().await;
        let mut products = self.products.load().await?;
        let (index, _) = locate(&products, id)?;

        let removed = products.remove(index);
        self.products.save(&products).await?;

        if !removed.thumbnail.is_empty() {
            discard_asset(self.products.store().as_ref(), &removed.thumbnail).await;
        }

        info!("Deleted product {} ({})", removed.id, removed.title);
        Ok(())
    }

    async fn try_insert(
        &self,
        data: ProductInput,
        upload: Option<&UploadedFile>,
    ) -> AppResult<Product> {
        let (Some(title), Some(status), Some(stock)) = (
            data.present_title(),
            data.present_status(),
            data.present_stock(),
        ) else {
            return Err(AppError::validation(format!(
                "Missing required fields: {}",
                missing_fields(&data).join(", ")
            )));
        };

        let Some(upload) = upload.filter(|u| !u.filename.trim().is_empty()) else {
            return Err(AppError::validation("Missing thumbnail image file"));
        };

        let status = coerce_status(status)?;
        let stock = coerce_stock(stock)?;

        let _guard = self.products.lock().await;
        let mut products = self.products.load().await?;

        let id = next_id(&products).ok_or_else(|| {
            AppError::internal(format!("No identifiers left in {PRODUCTS_DOCUMENT}"))
        })?;
        let product = Product {
            id,
            title: title.to_string(),
            status,
            stock,
            thumbnail: upload.filename.clone(),
        };

        products.push(product.clone());
        self.products.save(&products).await?;

        info!("Created product {} ({})", product.id, product.title);
        Ok(product)
    }

    async fn try_update(
        &self,
        id: &str,
        data: ProductInput,
        upload: Option<&UploadedFile>,
        upload_guard: &mut UploadGuard,
    ) -> AppResult<Product> {
        let _guard = self.products.lock().await;
        let mut products = self.products.load().await?;
        let (index, existing) = locate(&products, id)?;

        // An upload already referenced by the stored record must survive a failed write
        if upload.is_some_and(|u| u.filename == existing.thumbnail) {
            upload_guard.disarm();
        }

        let status = match data.present_status() {
            Some(value) => coerce_status(value)?,
            None => existing.status,
        };
        let stock = match data.present_stock() {
            Some(value) => coerce_stock(value)?,
            None => existing.stock,
        };
        let new_thumbnail = upload
            .map(|u| u.filename.as_str())
            .filter(|name| !name.trim().is_empty());

        let product = Product {
            id: existing.id,
            title: data
                .present_title()
                .map_or_else(|| existing.title.clone(), str::to_string),
            status,
            stock,
            thumbnail: new_thumbnail.map_or_else(|| existing.thumbnail.clone(), str::to_string),
        };
        let previous_thumbnail = std::mem::replace(&mut products[index], product.clone()).thumbnail;

        self.products.save(&products).await?;

        if let Some(new_thumbnail) = new_thumbnail {
            if new_thumbnail != previous_thumbnail && !previous_thumbnail.is_empty() {
                discard_asset(self.products.store().as_ref(), &previous_thumbnail).await;
            }
        }

        info!("Updated product {} ({})", product.id, product.title);
        Ok(product)
    }
}

/// Find the record for an external id, or a `NotFound` error naming it.
fn locate<'a>(products: &'a [Product], id: &str) -> AppResult<(usize, &'a Product)> {
    parse_id(id)
        .and_then(|numeric| position_of(products, numeric))
        .map(|index| (index, &products[index]))
        .ok_or_else(|| AppError::not_found(RESOURCE, id))
}

fn missing_fields(data: &ProductInput) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if data.present_title().is_none() {
        missing.push("title");
    }
    if data.present_status().is_none() {
        missing.push("status");
    }
    if data.present_stock().is_none() {
        missing.push("stock");
    }
    missing
}

fn coerce_status(value: &FieldValue) -> AppResult<bool> {
    to_boolean(value).ok_or_else(|| {
        AppError::validation(format!("Invalid status '{value}': expected true or false"))
    })
}

fn coerce_stock(value: &FieldValue) -> AppResult<u64> {
    to_stock(value).ok_or_else(|| {
        AppError::validation(format!(
            "Invalid stock '{value}': expected a non-negative integer"
        ))
    })
}
