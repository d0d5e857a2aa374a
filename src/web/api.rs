//! REST API handlers for the storefront resources

pub mod carts;
pub mod products;
