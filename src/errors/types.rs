//! Error type definitions for the storefront service
//!
//! Two layers of errors exist: [`StoreError`] for raw document and asset I/O,
//! and [`AppError`], the single error shape every manager operation returns.
//! Each carries a classification code that the web layer maps straight onto
//! an HTTP status.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error type
///
/// Every public manager operation surfaces failures as this type, so callers
/// never see heterogeneous error shapes. [`AppError::code`] yields the
/// classification used as the HTTP status.
#[derive(Error, Debug)]
pub enum AppError {
    /// Document or asset storage failures
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// Required input missing or malformed
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Referenced id does not exist in the collection
    #[error("Not found: {resource} with id {id}")]
    NotFound { resource: String, id: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// File store specific errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// A document or asset could not be read
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A document or asset could not be written
    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An asset could not be removed
    #[error("Failed to remove {path:?}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A document exists but is not a valid JSON collection
    #[error("Malformed document {document}: {source}")]
    Malformed {
        document: String,
        source: serde_json::Error,
    },

    /// A collection could not be serialized
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Asset name would escape the asset directory
    #[error("Invalid asset name {name:?}: {reason}")]
    InvalidAssetName { name: String, reason: String },
}

impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error for a specific resource
    pub fn not_found<R: Into<String>, I: Into<String>>(resource: R, id: I) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Classification code, mapped directly to an HTTP status by the web layer
    pub fn code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::Storage(e) => e.code(),
            Self::Internal { .. } => 500,
        }
    }

    /// Whether this is a `NotFound` classification
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl StoreError {
    /// Create an invalid asset name error
    pub fn invalid_asset_name<N: Into<String>, R: Into<String>>(name: N, reason: R) -> Self {
        Self::InvalidAssetName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Classification code passed through to [`AppError::code`]
    pub fn code(&self) -> u16 {
        match self {
            Self::InvalidAssetName { .. } => 400,
            _ => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_codes() {
        assert_eq!(AppError::validation("missing title").code(), 400);
        assert_eq!(AppError::not_found("product", "7").code(), 404);
        assert_eq!(AppError::internal("boom").code(), 500);

        let io = StoreError::Write {
            path: PathBuf::from("products.json"),
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(AppError::from(io).code(), 500);

        let bad_name = StoreError::invalid_asset_name("../x.png", "contains a parent component");
        assert_eq!(AppError::from(bad_name).code(), 400);
    }

    #[test]
    fn messages_keep_context() {
        let err = AppError::not_found("product", "99");
        assert_eq!(err.to_string(), "Not found: product with id 99");
        assert!(err.is_not_found());
    }
}
