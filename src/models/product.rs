use serde::{Deserialize, Serialize};

use super::FieldValue;
use crate::utils::collection::Identified;

/// A persisted product record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub status: bool,
    pub stock: u64,
    /// Bare file name of the thumbnail in the images directory
    #[serde(default)]
    pub thumbnail: String,
}

impl Identified for Product {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Product fields as supplied by a create or update request
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductInput {
    pub title: Option<String>,
    pub status: Option<FieldValue>,
    pub stock: Option<FieldValue>,
}

impl ProductInput {
    /// Title if supplied and not blank
    pub fn present_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Status if supplied and not blank
    pub fn present_status(&self) -> Option<&FieldValue> {
        self.status.as_ref().filter(|v| v.is_present())
    }

    /// Stock if supplied and not blank
    pub fn present_stock(&self) -> Option<&FieldValue> {
        self.stock.as_ref().filter(|v| v.is_present())
    }
}

/// An image already written into the images directory by the upload handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub filename: String,
}

impl UploadedFile {
    pub fn new<S: Into<String>>(filename: S) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}
