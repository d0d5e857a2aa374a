use serde::{Deserialize, Serialize};

use crate::utils::collection::Identified;

/// A persisted cart record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub id: u64,
    #[serde(default)]
    pub products: Vec<CartItem>,
}

impl Identified for Cart {
    fn id(&self) -> u64 {
        self.id
    }
}

/// One line of a cart: a product id and how many of it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: u64,
    pub quantity: u64,
}

/// Request body for creating a cart
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartCreateRequest {
    #[serde(default)]
    pub products: Vec<CartItemRequest>,
}

/// A requested line item; quantity defaults to 1
#[derive(Debug, Clone, Deserialize)]
pub struct CartItemRequest {
    pub product: u64,
    pub quantity: Option<u64>,
}

/// Request body for adding a product to a cart
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddProductRequest {
    pub quantity: Option<u64>,
}
