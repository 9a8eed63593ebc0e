//! Repository for the `assets` table.

use chrono::Utc;
use sqlx::{Executor, Sqlite};
use studio_core::types::DbId;

use crate::models::asset::{Asset, AssetContent, CreateAsset};

const COLUMNS: &str = "id, course_id, filename, mime_type, size_bytes, created_at";

/// Stores and serves uploaded files.
pub struct AssetRepo;

impl AssetRepo {
    /// Store an uploaded file, returning its metadata.
    pub async fn create<'e, E>(executor: E, input: &CreateAsset) -> Result<Asset, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!(
            "INSERT INTO assets (course_id, filename, mime_type, size_bytes, content, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(input.course_id)
            .bind(&input.filename)
            .bind(&input.mime_type)
            .bind(input.content.len() as i64)
            .bind(&input.content)
            .bind(Utc::now())
            .fetch_one(executor)
            .await
    }

    /// Find asset metadata by ID.
    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Asset>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE id = $1");
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Load an asset's bytes for download.
    pub async fn find_content<'e, E>(executor: E, id: DbId) -> Result<Option<AssetContent>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, AssetContent>(
            "SELECT id, filename, mime_type, content FROM assets WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Delete a course's assets that no video references as its live or
    /// pending handout. Returns the number of rows removed.
    pub async fn delete_unreferenced<'e, E>(executor: E, course_id: DbId) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "DELETE FROM assets \
             WHERE course_id = $1 \
               AND id NOT IN ( \
                   SELECT handout_asset_id FROM video_components \
                   WHERE handout_asset_id IS NOT NULL \
                   UNION \
                   SELECT pending_handout_asset_id FROM video_components \
                   WHERE pending_handout_asset_id IS NOT NULL \
               )",
        )
        .bind(course_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }
}
