pub mod assets;
pub mod course;
pub mod group_configuration;
pub mod video;

use sqlx::{Executor, Sqlite};
use studio_db::models::course::Course;
use studio_db::repositories::CourseRepo;

use crate::error::{AppError, AppResult};

/// Resolve a course by key, or 404.
pub(crate) async fn find_course<'e, E>(executor: E, course_key: &str) -> AppResult<Course>
where
    E: Executor<'e, Database = Sqlite>,
{
    CourseRepo::find_by_key(executor, course_key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Course '{course_key}' not found")))
}
