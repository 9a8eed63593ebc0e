//! Handlers for video components and their handout slot.
//!
//! Video components are nested under courses:
//! `/courses/{course_key}/videos[/{video_id}[/handout|/save|/discard]]`
//!
//! Upload and clear only change the editor (pending) state. `save` publishes
//! the pending change to the live handout; `discard` drops it.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use sqlx::SqliteConnection;
use studio_core::course::validate_display_name;
use studio_core::error::CoreError;
use studio_core::handout::{mime_essence, sanitize_filename, HandoutSlot, HandoutView};
use studio_core::types::DbId;
use studio_db::models::asset::CreateAsset;
use studio_db::models::course::Course;
use studio_db::models::video::{CreateVideoComponent, VideoComponent, VideoComponentRow};
use studio_db::repositories::{AssetRepo, VideoComponentRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{assets, find_course};
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the handout file.
pub const UPLOAD_FIELD: &str = "file";

const OCTET_STREAM: &str = "application/octet-stream";

/// Query parameters for `GET /{video_id}/handout`.
#[derive(Debug, Deserialize)]
pub struct HandoutQuery {
    #[serde(default)]
    pub view: HandoutView,
}

/// A file read from the upload form.
struct Upload {
    filename: String,
    mime_type: String,
    content: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_video(
    conn: &mut SqliteConnection,
    course_key: &str,
    video_id: DbId,
) -> AppResult<(Course, VideoComponentRow)> {
    let course = find_course(&mut *conn, course_key).await?;
    let row = VideoComponentRepo::find_in_course(&mut *conn, course.id, video_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VideoComponent",
            id: video_id,
        }))?;
    Ok((course, row))
}

async fn reload_video(
    conn: &mut SqliteConnection,
    course_id: DbId,
    video_id: DbId,
) -> AppResult<VideoComponent> {
    let row = VideoComponentRepo::find_in_course(conn, course_id, video_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("Video component {video_id} vanished mid-update"))
        })?;
    Ok(VideoComponent::try_from(row)?)
}

/// Drop the course's assets that no slot references any more.
async fn prune_assets(conn: &mut SqliteConnection, course_id: DbId) -> AppResult<()> {
    let removed = AssetRepo::delete_unreferenced(conn, course_id).await?;
    if removed > 0 {
        tracing::debug!(course_id, removed, "Pruned unreferenced assets");
    }
    Ok(())
}

/// Apply `change` to the slot of one video inside a transaction.
async fn update_slot<F>(
    state: &AppState,
    course_key: &str,
    video_id: DbId,
    change: F,
) -> AppResult<VideoComponent>
where
    F: FnOnce(&mut HandoutSlot),
{
    let mut tx = studio_db::begin_write(&state.pool).await?;
    let (course, row) = load_video(&mut tx, course_key, video_id).await?;

    let mut slot = row.handout_slot()?;
    change(&mut slot);
    VideoComponentRepo::save_handout_slot(&mut *tx, row.id, &slot).await?;
    prune_assets(&mut tx, course.id).await?;

    let video = reload_video(&mut tx, course.id, row.id).await?;
    tx.commit().await?;
    Ok(video)
}

/// The declared part content type, unless it is missing or generic, in which
/// case the type is guessed from the filename.
pub fn resolve_mime_type(declared: Option<&str>, filename: &str) -> String {
    match declared.map(mime_essence) {
        Some(essence) if !essence.is_empty() && !essence.eq_ignore_ascii_case(OCTET_STREAM) => {
            essence.to_ascii_lowercase()
        }
        _ => mime_guess::from_path(filename)
            .first_or_octet_stream()
            .essence_str()
            .to_string(),
    }
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::BadRequest(e.body_text())
    }
}

async fn read_upload(multipart: &mut Multipart) -> AppResult<Upload> {
    let mut upload: Option<Upload> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = sanitize_filename(field.file_name().unwrap_or_default())?;
        let mime_type = resolve_mime_type(field.content_type(), &filename);
        let content = field.bytes().await.map_err(multipart_error)?;
        upload = Some(Upload {
            filename,
            mime_type,
            content: content.to_vec(),
        });
    }

    let upload = upload
        .ok_or_else(|| AppError::BadRequest(format!("Missing required '{UPLOAD_FIELD}' field")))?;
    if upload.content.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Uploaded file '{}' is empty",
            upload.filename
        )));
    }
    Ok(upload)
}

// ---------------------------------------------------------------------------
// POST /courses/{course_key}/videos
// ---------------------------------------------------------------------------

pub async fn create_video(
    State(state): State<AppState>,
    Path(course_key): Path<String>,
    Json(input): Json<CreateVideoComponent>,
) -> AppResult<(StatusCode, Json<DataResponse<VideoComponent>>)> {
    validate_display_name(&input.display_name)?;
    let course = find_course(&state.pool, &course_key).await?;

    let row = VideoComponentRepo::create(&state.pool, course.id, &input).await?;
    let video = VideoComponent::try_from(row)?;

    tracing::info!(
        course_key = %course.course_key,
        video_id = video.id,
        "Video component created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: video })))
}

// ---------------------------------------------------------------------------
// GET /courses/{course_key}/videos
// ---------------------------------------------------------------------------

pub async fn list_videos(
    State(state): State<AppState>,
    Path(course_key): Path<String>,
) -> AppResult<Json<DataResponse<Vec<VideoComponent>>>> {
    let course = find_course(&state.pool, &course_key).await?;
    let videos = VideoComponentRepo::list_for_course(&state.pool, course.id)
        .await?
        .into_iter()
        .map(VideoComponent::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(course_key = %course.course_key, count = videos.len(), "Listed videos");
    Ok(Json(DataResponse { data: videos }))
}

// ---------------------------------------------------------------------------
// GET /courses/{course_key}/videos/{video_id}
// ---------------------------------------------------------------------------

pub async fn get_video(
    State(state): State<AppState>,
    Path((course_key, video_id)): Path<(String, DbId)>,
) -> AppResult<Json<DataResponse<VideoComponent>>> {
    let mut conn = state.pool.acquire().await?;
    let (_, row) = load_video(&mut conn, &course_key, video_id).await?;
    Ok(Json(DataResponse {
        data: VideoComponent::try_from(row)?,
    }))
}

// ---------------------------------------------------------------------------
// POST /courses/{course_key}/videos/{video_id}/handout
// ---------------------------------------------------------------------------

/// Store the uploaded file and stage it as the pending handout.
pub async fn upload_handout(
    State(state): State<AppState>,
    Path((course_key, video_id)): Path<(String, DbId)>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<VideoComponent>>> {
    let upload = read_upload(&mut multipart).await?;

    let mut tx = studio_db::begin_write(&state.pool).await?;
    let (course, row) = load_video(&mut tx, &course_key, video_id).await?;
    let mut slot = row.handout_slot()?;

    let asset = AssetRepo::create(
        &mut *tx,
        &CreateAsset {
            course_id: course.id,
            filename: upload.filename,
            mime_type: upload.mime_type,
            content: upload.content,
        },
    )
    .await?;
    slot.upload(asset.handout_ref());
    VideoComponentRepo::save_handout_slot(&mut *tx, row.id, &slot).await?;
    prune_assets(&mut tx, course.id).await?;

    let video = reload_video(&mut tx, course.id, row.id).await?;
    tx.commit().await?;

    tracing::info!(
        course_key = %course.course_key,
        video_id,
        asset_id = asset.id,
        filename = %asset.filename,
        mime_type = %asset.mime_type,
        size_bytes = asset.size_bytes,
        "Handout uploaded (pending)",
    );

    Ok(Json(DataResponse { data: video }))
}

// ---------------------------------------------------------------------------
// DELETE /courses/{course_key}/videos/{video_id}/handout
// ---------------------------------------------------------------------------

/// Stage removal of the handout.
pub async fn clear_handout(
    State(state): State<AppState>,
    Path((course_key, video_id)): Path<(String, DbId)>,
) -> AppResult<Json<DataResponse<VideoComponent>>> {
    let video = update_slot(&state, &course_key, video_id, HandoutSlot::clear).await?;
    tracing::info!(course_key = %course_key, video_id, "Handout cleared (pending)");
    Ok(Json(DataResponse { data: video }))
}

// ---------------------------------------------------------------------------
// GET /courses/{course_key}/videos/{video_id}/handout
// ---------------------------------------------------------------------------

/// Serve the handout bytes for the requested view (`live` by default).
pub async fn download_handout(
    State(state): State<AppState>,
    Path((course_key, video_id)): Path<(String, DbId)>,
    Query(query): Query<HandoutQuery>,
) -> AppResult<Response> {
    let mut conn = state.pool.acquire().await?;
    let (_, row) = load_video(&mut conn, &course_key, video_id).await?;
    let slot = row.handout_slot()?;

    let handout = slot.reference(query.view).ok_or_else(|| {
        AppError::NotFound(format!("Video component {video_id} has no handout in this view"))
    })?;
    let content = AssetRepo::find_content(&mut *conn, handout.asset_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Asset",
            id: handout.asset_id,
        }))?;

    assets::content_response(content)
}

// ---------------------------------------------------------------------------
// POST /courses/{course_key}/videos/{video_id}/save
// ---------------------------------------------------------------------------

/// Publish the pending handout change. A no-op when nothing is pending.
pub async fn save_video(
    State(state): State<AppState>,
    Path((course_key, video_id)): Path<(String, DbId)>,
) -> AppResult<Json<DataResponse<VideoComponent>>> {
    let video = update_slot(&state, &course_key, video_id, |slot| {
        slot.save();
    })
    .await?;
    tracing::info!(
        course_key = %course_key,
        video_id,
        has_handout = video.handout.is_some(),
        "Video saved",
    );
    Ok(Json(DataResponse { data: video }))
}

// ---------------------------------------------------------------------------
// POST /courses/{course_key}/videos/{video_id}/discard
// ---------------------------------------------------------------------------

pub async fn discard_video_changes(
    State(state): State<AppState>,
    Path((course_key, video_id)): Path<(String, DbId)>,
) -> AppResult<Json<DataResponse<VideoComponent>>> {
    let video = update_slot(&state, &course_key, video_id, |slot| {
        slot.discard();
    })
    .await?;
    tracing::info!(course_key = %course_key, video_id, "Pending handout change discarded");
    Ok(Json(DataResponse { data: video }))
}
