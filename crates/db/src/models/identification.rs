//! Identification history model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;
use zfarming_core::identification::{IdentificationOutcome, MatchResult};
use zfarming_core::types::{DbId, Timestamp};

/// A row from the `identification_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct IdentificationRecord {
    pub id: DbId,
    pub image_name: String,
    pub image_bytes: i64,
    pub results: Json<Vec<MatchResult>>,
    pub is_mock: bool,
    pub confidence_score: Option<f64>,
    pub identified_plant_id: Option<String>,
    pub user_confirmed: Option<bool>,
    pub user_feedback: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert-ready history entry built from a reconciled outcome.
#[derive(Debug, Clone)]
pub struct NewIdentification {
    pub image_name: String,
    pub image_bytes: i64,
    pub results: Vec<MatchResult>,
    pub is_mock: bool,
    pub confidence_score: Option<f64>,
    pub identified_plant_id: Option<String>,
}

impl NewIdentification {
    /// Summarise `outcome` by its best-ranked result.
    pub fn from_outcome(
        image_name: &str,
        image_bytes: usize,
        outcome: &IdentificationOutcome,
    ) -> Self {
        let best = outcome.best();
        Self {
            image_name: image_name.to_string(),
            image_bytes: i64::try_from(image_bytes).unwrap_or(i64::MAX),
            results: outcome.results.clone(),
            is_mock: outcome.is_mock,
            confidence_score: best.map(|r| r.confidence),
            identified_plant_id: best.and_then(|r| r.matched_plant_id.clone()),
        }
    }
}

/// DTO for recording user feedback on an identification.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IdentificationFeedback {
    pub user_confirmed: bool,
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub user_feedback: String,
}
