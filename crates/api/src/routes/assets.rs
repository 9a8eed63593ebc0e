use axum::routing::get;
use axum::Router;

use crate::handlers::assets;
use crate::state::AppState;

/// Asset routes mounted at `/assets`.
///
/// ```text
/// GET    /{asset_id}   -> get_asset_content
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{asset_id}", get(assets::get_asset_content))
}
