pub mod care;
pub mod categories;
pub mod finder;
pub mod health;
pub mod plants;
pub mod scanner;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /plants                                  list, create
/// /plants/slug/{slug}                      get active plant by slug
/// /plants/{plant_id}                       get, update, deactivate
///
/// /categories                              list with active plant counts
/// /categories/{slug}/plants                active plants in a category
///
/// /finder/options                          form options (sunlight, space, care level, types)
/// /finder/recommendations                  recommend plants (POST)
///
/// /scanner/identify                        identify an uploaded image (POST, multipart)
/// /scanner/history                         recent identifications
/// /scanner/history/{id}                    get identification
/// /scanner/history/{id}/feedback           record user feedback (PUT)
///
/// /care                                    care hub (filter + selected plant)
/// /care/{plant_id}                         care sheet for a plant
/// /care/{plant_id}/guide                   replace a stored care guide (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/plants", plants::router())
        .nest("/categories", categories::router())
        .nest("/finder", finder::router())
        .nest("/scanner", scanner::router())
        .nest("/care", care::router())
}
