//! Service layer for business logic
//!
//! The resource managers live here. They sit between the web handlers and
//! the file store: handlers pass parsed request data in, managers validate,
//! assign ids, persist whole collections and keep thumbnails consistent with
//! the records that reference them.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use storefront::services::{CartManager, ProductManager};
//! use storefront::storage::JsonFileStore;
//!
//! # async fn example() -> storefront::errors::AppResult<()> {
//! let store = Arc::new(JsonFileStore::new("./data/files".into(), "./data/public/images".into()));
//! let products = ProductManager::new(store.clone());
//! let carts = CartManager::new(store, products.clone());
//!
//! let all = products.get_all().await?;
//! let cart = carts.add_one_product("1", "2", None).await?;
//! # Ok(())
//! # }
//! ```

pub mod cart_manager;
pub mod product_manager;
pub mod upload_guard;

pub use cart_manager::{CARTS_DOCUMENT, CartManager};
pub use product_manager::{PRODUCTS_DOCUMENT, ProductManager};
pub use upload_guard::UploadGuard;
