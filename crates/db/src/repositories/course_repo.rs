//! Repository for the `courses` table.

use chrono::Utc;
use sqlx::{Executor, Sqlite};
use studio_core::types::DbId;

use crate::models::course::{Course, CreateCourse};

const COLUMNS: &str =
    "id, course_key, display_name, next_group_configuration_id, created_at, updated_at";

/// Provides CRUD operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course, returning the created row.
    pub async fn create<'e, E>(executor: E, input: &CreateCourse) -> Result<Course, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO courses (course_key, display_name, created_at, updated_at) \
             VALUES ($1, $2, $3, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.course_key)
            .bind(&input.display_name)
            .bind(now)
            .fetch_one(executor)
            .await
    }

    /// Find a course by its key.
    pub async fn find_by_key<'e, E>(executor: E, course_key: &str) -> Result<Option<Course>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE course_key = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(course_key)
            .fetch_optional(executor)
            .await
    }

    /// List all courses ordered by key.
    pub async fn list<'e, E>(executor: E) -> Result<Vec<Course>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("SELECT {COLUMNS} FROM courses ORDER BY course_key ASC");
        sqlx::query_as::<_, Course>(&query).fetch_all(executor).await
    }

    /// Store the group configuration id counter.
    ///
    /// The counter never moves backwards; a lower value is ignored.
    pub async fn set_next_group_configuration_id<'e, E>(
        executor: E,
        course_id: DbId,
        next_id: DbId,
    ) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE courses \
             SET next_group_configuration_id = $2, updated_at = $3 \
             WHERE id = $1 AND next_group_configuration_id <= $2",
        )
        .bind(course_id)
        .bind(next_id)
        .bind(Utc::now())
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
