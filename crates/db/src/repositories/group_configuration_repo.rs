//! Repository for the `group_configurations` table.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::{Executor, Sqlite, SqliteConnection};
use studio_core::group_configuration::GroupConfiguration;
use studio_core::registry::GroupConfigurationRegistry;
use studio_core::types::DbId;

use crate::models::course::Course;
use crate::models::group_configuration::GroupConfigurationRow;

const COLUMNS: &str =
    "course_id, id, name, description, version, groups_json, created_at, updated_at";

/// Provides persistence for group configurations.
pub struct GroupConfigurationRepo;

impl GroupConfigurationRepo {
    /// List a course's configurations ordered by id.
    pub async fn list_for_course<'e, E>(
        executor: E,
        course_id: DbId,
    ) -> Result<Vec<GroupConfiguration>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM group_configurations WHERE course_id = $1 ORDER BY id ASC"
        );
        let rows = sqlx::query_as::<_, GroupConfigurationRow>(&query)
            .bind(course_id)
            .fetch_all(executor)
            .await?;
        Ok(rows.into_iter().map(GroupConfiguration::from).collect())
    }

    /// Find one configuration of a course.
    pub async fn find<'e, E>(
        executor: E,
        course_id: DbId,
        id: DbId,
    ) -> Result<Option<GroupConfiguration>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM group_configurations WHERE course_id = $1 AND id = $2"
        );
        let row = sqlx::query_as::<_, GroupConfigurationRow>(&query)
            .bind(course_id)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(row.map(GroupConfiguration::from))
    }

    /// Load the course-level registry aggregate (configurations + id counter).
    ///
    /// Call inside the transaction that will persist the result so the
    /// counter read and write are not interleaved with another writer.
    pub async fn load_registry(
        conn: &mut SqliteConnection,
        course: &Course,
    ) -> Result<GroupConfigurationRegistry, sqlx::Error> {
        let configurations = Self::list_for_course(&mut *conn, course.id).await?;
        Ok(GroupConfigurationRegistry::from_parts(
            course.next_group_configuration_id,
            configurations,
        ))
    }

    /// Insert a configuration whose id was assigned by the registry.
    pub async fn insert<'e, E>(
        executor: E,
        course_id: DbId,
        config: &GroupConfiguration,
    ) -> Result<(), sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO group_configurations \
                (course_id, id, name, description, version, groups_json, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7)",
        )
        .bind(course_id)
        .bind(config.id)
        .bind(&config.name)
        .bind(&config.description)
        .bind(config.version)
        .bind(Json(&config.groups))
        .bind(now)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Overwrite an existing configuration. Returns `false` if no row matched.
    pub async fn update<'e, E>(
        executor: E,
        course_id: DbId,
        config: &GroupConfiguration,
    ) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE group_configurations \
             SET name = $3, description = $4, version = $5, groups_json = $6, updated_at = $7 \
             WHERE course_id = $1 AND id = $2",
        )
        .bind(course_id)
        .bind(config.id)
        .bind(&config.name)
        .bind(&config.description)
        .bind(config.version)
        .bind(Json(&config.groups))
        .bind(Utc::now())
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a configuration. Returns `true` if a row was removed.
    pub async fn delete<'e, E>(executor: E, course_id: DbId, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result =
            sqlx::query("DELETE FROM group_configurations WHERE course_id = $1 AND id = $2")
                .bind(course_id)
                .bind(id)
                .execute(executor)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
