//! Handlers for a course's group configurations.
//!
//! Create and update take the raw body so malformed JSON is reported with the
//! same `{error, code}` shape as every other validation failure. Each mutation
//! loads the course's registry inside a write transaction, applies the change, and
//! writes back the affected row (plus the id counter on create).

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::{ACCEPT, LOCATION};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use studio_core::error::CoreError;
use studio_core::group_configuration::{GroupConfiguration, GroupConfigurationPayload};
use studio_core::types::DbId;
use studio_db::repositories::{CourseRepo, GroupConfigurationRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::find_course;
use crate::render;
use crate::response::DataResponse;
use crate::state::AppState;

/// Path of a single configuration, used for the `Location` header.
pub fn configuration_location(course_key: &str, id: DbId) -> String {
    format!("/api/v1/courses/{course_key}/group_configurations/{id}")
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"))
}

// ---------------------------------------------------------------------------
// GET /courses/{course_key}/group_configurations
// ---------------------------------------------------------------------------

/// JSON list when the client accepts JSON, otherwise the HTML index page.
pub async fn list_group_configurations(
    State(state): State<AppState>,
    Path(course_key): Path<String>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let course = find_course(&state.pool, &course_key).await?;
    let configurations = GroupConfigurationRepo::list_for_course(&state.pool, course.id).await?;

    tracing::debug!(
        course_key = %course.course_key,
        count = configurations.len(),
        "Listed group configurations",
    );

    if wants_json(&headers) {
        return Ok(Json(DataResponse {
            data: configurations,
        })
        .into_response());
    }
    Ok(Html(render::group_configurations_page(&course, &configurations)).into_response())
}

// ---------------------------------------------------------------------------
// POST /courses/{course_key}/group_configurations
// ---------------------------------------------------------------------------

pub async fn create_group_configuration(
    State(state): State<AppState>,
    Path(course_key): Path<String>,
    body: Bytes,
) -> AppResult<Response> {
    let mut tx = studio_db::begin_write(&state.pool).await?;
    let course = find_course(&mut *tx, &course_key).await?;
    let payload = GroupConfigurationPayload::parse(&body)?;

    let mut registry = GroupConfigurationRepo::load_registry(&mut tx, &course).await?;
    let created = registry.create(payload).clone();

    GroupConfigurationRepo::insert(&mut *tx, course.id, &created).await?;
    CourseRepo::set_next_group_configuration_id(&mut *tx, course.id, registry.next_id()).await?;
    tx.commit().await?;

    tracing::info!(
        course_key = %course.course_key,
        configuration_id = created.id,
        groups = created.groups.len(),
        "Group configuration created",
    );

    let location = configuration_location(&course.course_key, created.id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(created)).into_response())
}

// ---------------------------------------------------------------------------
// GET /courses/{course_key}/group_configurations/{id}
// ---------------------------------------------------------------------------

pub async fn get_group_configuration(
    State(state): State<AppState>,
    Path((course_key, id)): Path<(String, DbId)>,
) -> AppResult<Json<GroupConfiguration>> {
    let course = find_course(&state.pool, &course_key).await?;
    let configuration = GroupConfigurationRepo::find(&state.pool, course.id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "GroupConfiguration",
            id,
        }))?;
    Ok(Json(configuration))
}

// ---------------------------------------------------------------------------
// PUT /courses/{course_key}/group_configurations/{id}
// ---------------------------------------------------------------------------

/// Overwrite a configuration. The body must carry the addressed id.
pub async fn update_group_configuration(
    State(state): State<AppState>,
    Path((course_key, id)): Path<(String, DbId)>,
    body: Bytes,
) -> AppResult<Json<GroupConfiguration>> {
    let mut tx = studio_db::begin_write(&state.pool).await?;
    let course = find_course(&mut *tx, &course_key).await?;
    let payload = GroupConfigurationPayload::parse(&body)?;

    let mut registry = GroupConfigurationRepo::load_registry(&mut tx, &course).await?;
    let updated = registry.update(id, payload)?.clone();

    if !GroupConfigurationRepo::update(&mut *tx, course.id, &updated).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "GroupConfiguration",
            id,
        }));
    }
    tx.commit().await?;

    tracing::info!(
        course_key = %course.course_key,
        configuration_id = id,
        groups = updated.groups.len(),
        "Group configuration updated",
    );

    Ok(Json(updated))
}

// ---------------------------------------------------------------------------
// DELETE /courses/{course_key}/group_configurations/{id}
// ---------------------------------------------------------------------------

/// Remove a configuration. Its id is never handed out again.
pub async fn delete_group_configuration(
    State(state): State<AppState>,
    Path((course_key, id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let mut tx = studio_db::begin_write(&state.pool).await?;
    let course = find_course(&mut *tx, &course_key).await?;

    let mut registry = GroupConfigurationRepo::load_registry(&mut tx, &course).await?;
    registry.remove(id)?;

    GroupConfigurationRepo::delete(&mut *tx, course.id, id).await?;
    tx.commit().await?;

    tracing::info!(
        course_key = %course.course_key,
        configuration_id = id,
        "Group configuration deleted",
    );

    Ok(StatusCode::NO_CONTENT)
}
