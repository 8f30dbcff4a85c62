//! Route definitions for the plant catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::plants;
use crate::state::AppState;

/// Plant catalog routes mounted at `/plants`.
///
/// ```text
/// GET    /              -> list_plants
/// POST   /              -> create_plant
/// GET    /slug/{slug}   -> get_plant_by_slug
/// GET    /{plant_id}    -> get_plant
/// PUT    /{plant_id}    -> update_plant
/// DELETE /{plant_id}    -> deactivate_plant
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(plants::list_plants).post(plants::create_plant))
        .route("/slug/{slug}", get(plants::get_plant_by_slug))
        .route(
            "/{plant_id}",
            get(plants::get_plant)
                .put(plants::update_plant)
                .delete(plants::deactivate_plant),
        )
}
