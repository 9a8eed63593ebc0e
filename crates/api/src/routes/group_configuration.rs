use axum::routing::get;
use axum::Router;

use crate::handlers::group_configuration;
use crate::state::AppState;

/// Group configuration routes mounted at `/courses/{course_key}/group_configurations`.
///
/// ```text
/// GET    /       -> list_group_configurations (HTML unless Accept: application/json)
/// POST   /       -> create_group_configuration
/// GET    /{id}   -> get_group_configuration
/// PUT    /{id}   -> update_group_configuration
/// DELETE /{id}   -> delete_group_configuration
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(group_configuration::list_group_configurations)
                .post(group_configuration::create_group_configuration),
        )
        .route(
            "/{id}",
            get(group_configuration::get_group_configuration)
                .put(group_configuration::update_group_configuration)
                .delete(group_configuration::delete_group_configuration),
        )
}
