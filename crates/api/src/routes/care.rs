use axum::routing::{get, put};
use axum::Router;

use crate::handlers::care;
use crate::state::AppState;

/// Care hub routes mounted at `/care`.
///
/// ```text
/// GET /                    -> care_hub
/// GET /{plant_id}          -> get_care_sheet
/// PUT /{plant_id}/guide    -> update_care_guide
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(care::care_hub))
        .route("/{plant_id}", get(care::get_care_sheet))
        .route("/{plant_id}/guide", put(care::update_care_guide))
}
