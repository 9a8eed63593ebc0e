//! Route definitions for courses and everything scoped to a course.

use axum::routing::get;
use axum::Router;

use crate::config::ServerConfig;
use crate::handlers::course;
use crate::routes::{group_configuration, video};
use crate::state::AppState;

/// Course routes mounted at `/courses`.
///
/// ```text
/// GET    /                                  -> list_courses
/// POST   /                                  -> create_course
/// GET    /{course_key}                      -> get_course
/// *      /{course_key}/group_configurations -> group_configuration::router
/// *      /{course_key}/videos               -> video::router
/// ```
pub fn router(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .route("/", get(course::list_courses).post(course::create_course))
        .route("/{course_key}", get(course::get_course))
        .nest(
            "/{course_key}/group_configurations",
            group_configuration::router(),
        )
        .nest("/{course_key}/videos", video::router(config.max_upload_bytes))
}
