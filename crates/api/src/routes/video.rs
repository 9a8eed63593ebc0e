//! Route definitions for video components and their handout slot.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::video;
use crate::state::AppState;

/// Video routes mounted at `/courses/{course_key}/videos`.
///
/// ```text
/// GET    /                       -> list_videos
/// POST   /                       -> create_video
/// GET    /{video_id}             -> get_video
/// POST   /{video_id}/handout     -> upload_handout (multipart, field `file`)
/// DELETE /{video_id}/handout     -> clear_handout
/// GET    /{video_id}/handout     -> download_handout (?view=live|editor)
/// POST   /{video_id}/save        -> save_video
/// POST   /{video_id}/discard     -> discard_video_changes
/// ```
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(video::list_videos).post(video::create_video))
        .route("/{video_id}", get(video::get_video))
        .route(
            "/{video_id}/handout",
            get(video::download_handout)
                .post(video::upload_handout)
                .delete(video::clear_handout)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/{video_id}/save", post(video::save_video))
        .route("/{video_id}/discard", post(video::discard_video_changes))
}
