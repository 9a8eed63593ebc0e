//! Uploaded asset models.

use serde::Serialize;
use sqlx::FromRow;
use studio_core::handout::HandoutRef;
use studio_core::types::{DbId, Timestamp};

/// Asset metadata (a row from `assets` without its content).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Asset {
    pub id: DbId,
    pub course_id: DbId,
    pub filename: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub created_at: Timestamp,
}

impl Asset {
    /// The handout reference pointing at this asset.
    pub fn handout_ref(&self) -> HandoutRef {
        HandoutRef::new(self.id, self.filename.clone(), self.mime_type.clone())
    }
}

/// Asset bytes plus the headers needed to serve them.
#[derive(Debug, Clone, FromRow)]
pub struct AssetContent {
    pub id: DbId,
    pub filename: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

/// DTO for storing an uploaded file.
#[derive(Debug, Clone)]
pub struct CreateAsset {
    pub course_id: DbId,
    pub filename: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}
