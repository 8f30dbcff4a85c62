//! Route definitions for the plant scanner.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::scanner;
use crate::state::AppState;

/// Scanner routes mounted at `/scanner`.
///
/// ```text
/// POST /identify                -> identify_plant
/// GET  /history                 -> list_history
/// GET  /history/{id}            -> get_history
/// PUT  /history/{id}/feedback   -> submit_feedback
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/identify", post(scanner::identify_plant))
        .route("/history", get(scanner::list_history))
        .route("/history/{id}", get(scanner::get_history))
        .route("/history/{id}/feedback", put(scanner::submit_feedback))
}
