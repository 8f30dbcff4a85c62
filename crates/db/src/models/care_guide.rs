//! Extended care guide model.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use zfarming_core::care::{CareGuide, MonthlyCare};
use zfarming_core::types::{DbId, Timestamp};

/// A row from the `care_guides` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CareGuideRow {
    pub id: DbId,
    pub plant_id: DbId,
    pub monthly_care: Json<Vec<MonthlyCare>>,
    pub fertilizing_guide: String,
    pub pruning_guide: String,
    pub repotting_guide: String,
    pub pest_control: String,
    pub disease_prevention: String,
    pub pro_tips: String,
    pub common_mistakes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<CareGuideRow> for CareGuide {
    fn from(row: CareGuideRow) -> Self {
        let mut monthly_care = row.monthly_care.0;
        monthly_care.sort_by_key(|m| m.month);
        CareGuide {
            monthly_care,
            fertilizing_guide: row.fertilizing_guide,
            pruning_guide: row.pruning_guide,
            repotting_guide: row.repotting_guide,
            pest_control: row.pest_control,
            disease_prevention: row.disease_prevention,
            pro_tips: row.pro_tips,
            common_mistakes: row.common_mistakes,
        }
    }
}
