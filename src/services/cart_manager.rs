//! Cart persistence on top of the products collection.

use std::sync::Arc;
use tracing::{debug, info};

use super::product_manager::ProductManager;
use crate::errors::{AppError, AppResult};
use crate::models::{Cart, CartCreateRequest, CartItem};
use crate::storage::{Collection, FileStore};
use crate::utils::{next_id, parse_id, position_of};

/// Document name of the carts collection
pub const CARTS_DOCUMENT: &str = "carts.json";

/// Resource manager for the carts collection
#[derive(Debug, Clone)]
pub struct CartManager {
    carts: Collection<Cart>,
    products: ProductManager,
}

impl CartManager {
    pub fn new(store: Arc<dyn FileStore>, products: ProductManager) -> Self {
        Self {
            carts: Collection::new(store, CARTS_DOCUMENT),
            products,
        }
    }

    /// The collection handle backing this manager
    pub fn collection(&self) -> &Collection<Cart> {
        &self.carts
    }

    pub async fn get_all(&self) -> AppResult<Vec<Cart>> {
        let carts = self.carts.load().await?;
        debug!("Loaded {} carts", carts.len());
        Ok(carts)
    }

    pub async fn get_one_by_id(&self, id: &str) -> AppResult<Cart> {
        let carts = self.carts.load().await?;
        let index = locate(&carts, id)?;
        Ok(carts[index].clone())
    }

    /// Create a cart, optionally pre-filled with line items.
    ///
    /// Every referenced product must exist; repeated products are merged.
    pub async fn insert_one(&self, request: CartCreateRequest) -> AppResult<Cart> {
        let mut items: Vec<CartItem> = Vec::new();
        if !request.products.is_empty() {
            let products = self.products.get_all().await?;
            for requested in request.products {
                if position_of(&products, requested.product).is_none() {
                    return Err(AppError::not_found("product", requested.product.to_string()));
                }
                let quantity = validate_quantity(requested.quantity)?;
                add_to_items(&mut items, requested.product, quantity);
            }
        }

        let _guard = self.carts.lock().await;
        let mut carts = self.carts.load().await?;
        let id = next_id(&carts).ok_or_else(|| {
            AppError::internal(format!("No identifiers left in {CARTS_DOCUMENT}"))
        })?;
        let cart = Cart {
            id,
            products: items,
        };
        carts.push(cart.clone());
        self.carts.save(&carts).await?;

        info!("Created cart {} with {} line items", cart.id, cart.products.len());
        Ok(cart)
    }

    /// Add `quantity` (default 1) of a product to a cart
    pub async fn add_one_product(
        &self,
        cart_id: &str,
        product_id: &str,
        quantity: Option<u64>,
    ) -> AppResult<Cart> {
        let quantity = validate_quantity(quantity)?;
        let product = self.products.get_one_by_id(product_id).await?;

        let _guard = self.carts.lock().await;
        let mut carts = self.carts.load().await?;
        let index = locate(&carts, cart_id)?;

        add_to_items(&mut carts[index].products, product.id, quantity);
        let cart = carts[index].clone();
        self.carts.save(&carts).await?;

        info!("Added {} x product {} to cart {}", quantity, product.id, cart.id);
        Ok(cart)
    }

    /// Remove a product's line item from a cart
    pub async fn remove_one_product(&self, cart_id: &str, product_id: &str) -> AppResult<Cart> {
        let _guard = self.carts.lock().await;
        let mut carts = self.carts.load().await?;
        let index = locate(&carts, cart_id)?;

        let items = &mut carts[index].products;
        let position = parse_id(product_id)
            .and_then(|numeric| items.iter().position(|item| item.product == numeric))
            .ok_or_else(|| {
                AppError::not_found(format!("product in cart {cart_id}"), product_id)
            })?;
        let removed = items.remove(position);

        let cart = carts[index].clone();
        self.carts.save(&carts).await?;

        info!("Removed product {} from cart {}", removed.product, cart.id);
        Ok(cart)
    }

    pub async fn delete_one_by_id(&self, id: &str) -> AppResult<()> {
        let _guard = self.carts.lock().await;
        let mut carts = self.carts.load().await?;
        let index = locate(&carts, id)?;

        let removed = carts.remove(index);
        self.carts.save(&carts).await?;

        info!("Deleted cart {}", removed.id);
        Ok(())
    }
}

fn locate(carts: &[Cart], id: &str) -> AppResult<usize> {
    parse_id(id)
        .and_then(|numeric| position_of(carts, numeric))
        .ok_or_else(|| AppError::not_found("cart", id))
}

fn validate_quantity(quantity: Option<u64>) -> AppResult<u64> {
    match quantity.unwrap_or(1) {
        0 => Err(AppError::validation("Quantity must be at least 1")),
        n => Ok(n),
    }
}

/// Merge `quantity` of `product` into `items`, keeping one line per product.
fn add_to_items(items: &mut Vec<CartItem>, product: u64, quantity: u64) {
    match items.iter_mut().find(|item| item.product == product) {
        Some(item) => item.quantity = item.quantity.saturating_add(quantity),
        None => items.push(CartItem { product, quantity }),
    }
}
