//! Centralized error handling for the storefront service
//!
//! # Error Categories
//!
//! - **Storage Errors**: JSON document and image asset I/O
//! - **Validation Errors**: missing or malformed request input
//! - **Not Found Errors**: ids that do not exist in a collection
//!
//! # Usage
//!
//! ```rust
//! use storefront::errors::{AppError, AppResult};
//!
//! fn example_function(title: &str) -> AppResult<String> {
//!     if title.trim().is_empty() {
//!         return Err(AppError::validation("title is required"));
//!     }
//!     Ok(title.to_string())
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for file store Results
pub type StoreResult<T> = Result<T, StoreError>;
