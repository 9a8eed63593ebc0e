//! Repository for the `video_components` table and its handout slot columns.

use chrono::Utc;
use sqlx::{Executor, Sqlite};
use studio_core::handout::HandoutSlot;
use studio_core::types::DbId;

use crate::models::video::{CreateVideoComponent, VideoComponentRow};

/// Video columns joined with live (`la`) and pending (`pa`) asset metadata.
const SELECT_JOINED: &str = "SELECT v.id, v.course_id, v.display_name, \
            v.handout_asset_id, la.filename AS handout_filename, la.mime_type AS handout_mime_type, \
            v.pending_handout_action, v.pending_handout_asset_id, \
            pa.filename AS pending_filename, pa.mime_type AS pending_mime_type, \
            v.created_at, v.updated_at \
     FROM video_components v \
     LEFT JOIN assets la ON la.id = v.handout_asset_id \
     LEFT JOIN assets pa ON pa.id = v.pending_handout_asset_id";

/// Provides CRUD operations for video components.
pub struct VideoComponentRepo;

impl VideoComponentRepo {
    /// Insert a video component with an empty handout slot.
    pub async fn create<'e, E>(
        executor: E,
        course_id: DbId,
        input: &CreateVideoComponent,
    ) -> Result<VideoComponentRow, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let now = Utc::now();
        sqlx::query_as::<_, VideoComponentRow>(
            "INSERT INTO video_components (course_id, display_name, created_at, updated_at) \
             VALUES ($1, $2, $3, $3) \
             RETURNING id, course_id, display_name, \
                handout_asset_id, NULL AS handout_filename, NULL AS handout_mime_type, \
                pending_handout_action, pending_handout_asset_id, \
                NULL AS pending_filename, NULL AS pending_mime_type, \
                created_at, updated_at",
        )
        .bind(course_id)
        .bind(&input.display_name)
        .bind(now)
        .fetch_one(executor)
        .await
    }

    /// Find a video component, scoped to its course.
    pub async fn find_in_course<'e, E>(
        executor: E,
        course_id: DbId,
        id: DbId,
    ) -> Result<Option<VideoComponentRow>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("{SELECT_JOINED} WHERE v.course_id = $1 AND v.id = $2");
        sqlx::query_as::<_, VideoComponentRow>(&query)
            .bind(course_id)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List a course's video components ordered by id.
    pub async fn list_for_course<'e, E>(
        executor: E,
        course_id: DbId,
    ) -> Result<Vec<VideoComponentRow>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("{SELECT_JOINED} WHERE v.course_id = $1 ORDER BY v.id ASC");
        sqlx::query_as::<_, VideoComponentRow>(&query)
            .bind(course_id)
            .fetch_all(executor)
            .await
    }

    /// Persist the live handout and pending change of a slot.
    pub async fn save_handout_slot<'e, E>(
        executor: E,
        id: DbId,
        slot: &HandoutSlot,
    ) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let live_asset_id = slot.live().map(|h| h.asset_id);
        let pending_action = slot.pending().map(|p| p.kind());
        let pending_asset_id = slot.pending().and_then(|p| p.asset_id());

        let result = sqlx::query(
            "UPDATE video_components \
             SET handout_asset_id = $2, pending_handout_action = $3, \
                 pending_handout_asset_id = $4, updated_at = $5 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(live_asset_id)
        .bind(pending_action)
        .bind(pending_asset_id)
        .bind(Utc::now())
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
