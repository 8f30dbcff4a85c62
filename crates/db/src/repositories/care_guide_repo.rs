//! Repository for the `care_guides` table.

use sqlx::types::Json;
use sqlx::PgPool;
use zfarming_core::care::CareGuide;
use zfarming_core::types::DbId;

use crate::models::care_guide::CareGuideRow;

/// Column list for care_guides queries.
const COLUMNS: &str = "id, plant_id, monthly_care, fertilizing_guide, pruning_guide, \
    repotting_guide, pest_control, disease_prevention, pro_tips, common_mistakes, \
    created_at, updated_at";

/// Column list qualified with the `g` alias, for joins.
const JOINED_COLUMNS: &str = "g.id, g.plant_id, g.monthly_care, g.fertilizing_guide, \
    g.pruning_guide, g.repotting_guide, g.pest_control, g.disease_prevention, g.pro_tips, \
    g.common_mistakes, g.created_at, g.updated_at";

/// One guide per plant, keyed by the plant row ID.
pub struct CareGuideRepo;

impl CareGuideRepo {
    /// Find the stored guide for a plant by its `plant_id` key.
    pub async fn find_by_plant_key(
        pool: &PgPool,
        plant_id: &str,
    ) -> Result<Option<CareGuideRow>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM care_guides g \
             JOIN plants p ON p.id = g.plant_id \
             WHERE p.plant_id = $1"
        );
        sqlx::query_as::<_, CareGuideRow>(&query)
            .bind(plant_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace the guide for a plant row.
    pub async fn upsert(
        pool: &PgPool,
        plant_id: DbId,
        guide: &CareGuide,
    ) -> Result<CareGuideRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO care_guides \
                (plant_id, monthly_care, fertilizing_guide, pruning_guide, repotting_guide, \
                 pest_control, disease_prevention, pro_tips, common_mistakes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT ON CONSTRAINT uq_care_guides_plant DO UPDATE SET \
                monthly_care = EXCLUDED.monthly_care, \
                fertilizing_guide = EXCLUDED.fertilizing_guide, \
                pruning_guide = EXCLUDED.pruning_guide, \
                repotting_guide = EXCLUDED.repotting_guide, \
                pest_control = EXCLUDED.pest_control, \
                disease_prevention = EXCLUDED.disease_prevention, \
                pro_tips = EXCLUDED.pro_tips, \
                common_mistakes = EXCLUDED.common_mistakes \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CareGuideRow>(&query)
            .bind(plant_id)
            .bind(Json(&guide.monthly_care))
            .bind(&guide.fertilizing_guide)
            .bind(&guide.pruning_guide)
            .bind(&guide.repotting_guide)
            .bind(&guide.pest_control)
            .bind(&guide.disease_prevention)
            .bind(&guide.pro_tips)
            .bind(&guide.common_mistakes)
            .fetch_one(pool)
            .await
    }
}
