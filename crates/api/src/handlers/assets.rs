//! Serving stored asset bytes.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use studio_core::error::CoreError;
use studio_core::types::DbId;
use studio_db::models::asset::AssetContent;
use studio_db::repositories::AssetRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/assets/{asset_id}
pub async fn get_asset_content(
    State(state): State<AppState>,
    Path(asset_id): Path<DbId>,
) -> AppResult<Response> {
    let content = AssetRepo::find_content(&state.pool, asset_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Asset",
            id: asset_id,
        }))?;
    content_response(content)
}

/// Build a `200 OK` response carrying the asset bytes and its mime type.
pub(crate) fn content_response(asset: AssetContent) -> AppResult<Response> {
    let disposition = format!(
        "inline; filename=\"{}\"",
        header_safe_filename(&asset.filename)
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, asset.mime_type.as_str())
        .header(header::CONTENT_LENGTH, asset.content.len().to_string())
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(Body::from(asset.content))
        .map_err(|e| AppError::InternalError(format!("Failed to build asset response: {e}")))
}

/// Replace characters that cannot appear inside a quoted header parameter.
fn header_safe_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() || c == ' ') && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
