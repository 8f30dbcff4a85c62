use axum::routing::{get, post};
use axum::Router;

use crate::handlers::finder;
use crate::state::AppState;

/// Plant finder routes mounted at `/finder`.
///
/// ```text
/// GET  /options          -> get_options
/// POST /recommendations  -> recommend_plants
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/options", get(finder::get_options))
        .route("/recommendations", post(finder::recommend_plants))
}
