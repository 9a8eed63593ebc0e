//! Handlers for the `/courses` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use studio_core::course::{validate_course_key, validate_display_name};
use studio_core::error::CoreError;
use studio_db::models::course::{Course, CreateCourse};
use studio_db::repositories::CourseRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::find_course;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /courses
// ---------------------------------------------------------------------------

/// Create a course. Its group configuration counter starts at 1.
pub async fn create_course(
    State(state): State<AppState>,
    Json(input): Json<CreateCourse>,
) -> AppResult<(StatusCode, Json<DataResponse<Course>>)> {
    validate_course_key(&input.course_key)?;
    validate_display_name(&input.display_name)?;

    if CourseRepo::find_by_key(&state.pool, &input.course_key)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Course '{}' already exists",
            input.course_key
        ))));
    }

    let course = CourseRepo::create(&state.pool, &input).await?;

    tracing::info!(
        course_id = course.id,
        course_key = %course.course_key,
        "Course created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: course })))
}

// ---------------------------------------------------------------------------
// GET /courses
// ---------------------------------------------------------------------------

pub async fn list_courses(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Course>>>> {
    let courses = CourseRepo::list(&state.pool).await?;
    tracing::debug!(count = courses.len(), "Listed courses");
    Ok(Json(DataResponse { data: courses }))
}

// ---------------------------------------------------------------------------
// GET /courses/{course_key}
// ---------------------------------------------------------------------------

pub async fn get_course(
    State(state): State<AppState>,
    Path(course_key): Path<String>,
) -> AppResult<Json<DataResponse<Course>>> {
    let course = find_course(&state.pool, &course_key).await?;
    Ok(Json(DataResponse { data: course }))
}
