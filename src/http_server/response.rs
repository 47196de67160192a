//! # Response Formatting
//!
//! Acknowledgement bodies. Records themselves are serialized directly.

use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// Delete acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub detail: String,
}

impl DeleteResponse {
    pub fn deleted(entity: Entity) -> Self {
        Self {
            detail: format!("{} deleted successfully", entity),
        }
    }
}

/// Bulk upload acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
}

impl UploadResponse {
    pub fn uploaded() -> Self {
        Self {
            message: "Orders successfully uploaded".to_string(),
        }
    }
}
