pub mod assets;
pub mod course;
pub mod group_configuration;
pub mod health;
pub mod video;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /courses                                                  list, create
/// /courses/{course_key}                                     get
///
/// /courses/{course_key}/group_configurations                index (HTML or JSON), create
/// /courses/{course_key}/group_configurations/{id}           get, update, delete
///
/// /courses/{course_key}/videos                              list, create
/// /courses/{course_key}/videos/{video_id}                   get
/// /courses/{course_key}/videos/{video_id}/handout           upload, clear, download
/// /courses/{course_key}/videos/{video_id}/save              save pending handout change
/// /courses/{course_key}/videos/{video_id}/discard           discard pending handout change
///
/// /assets/{asset_id}                                        serve stored bytes
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .nest("/courses", course::router(config))
        .nest("/assets", assets::router())
}
