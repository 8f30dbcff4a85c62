//! Repository for the `identification_history` table.

use sqlx::types::Json;
use sqlx::PgPool;
use zfarming_core::types::DbId;

use crate::models::identification::{
    IdentificationFeedback, IdentificationRecord, NewIdentification,
};

/// Column list for identification_history queries.
const COLUMNS: &str = "id, image_name, image_bytes, results, is_mock, confidence_score, \
    identified_plant_id, user_confirmed, user_feedback, created_at, updated_at";

/// Append-only history of identification requests, plus user feedback.
pub struct IdentificationRepo;

impl IdentificationRepo {
    /// Record a reconciled identification.
    pub async fn create(
        pool: &PgPool,
        input: &NewIdentification,
    ) -> Result<IdentificationRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO identification_history \
                (image_name, image_bytes, results, is_mock, confidence_score, identified_plant_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IdentificationRecord>(&query)
            .bind(&input.image_name)
            .bind(input.image_bytes)
            .bind(Json(&input.results))
            .bind(input.is_mock)
            .bind(input.confidence_score)
            .bind(&input.identified_plant_id)
            .fetch_one(pool)
            .await
    }

    /// Find a history entry by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<IdentificationRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM identification_history WHERE id = $1");
        sqlx::query_as::<_, IdentificationRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Most recent entries first.
    pub async fn list_recent(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<IdentificationRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM identification_history \
             ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, IdentificationRecord>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Store user feedback. Returns `None` if the entry does not exist.
    pub async fn set_feedback(
        pool: &PgPool,
        id: DbId,
        feedback: &IdentificationFeedback,
    ) -> Result<Option<IdentificationRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE identification_history SET user_confirmed = $2, user_feedback = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IdentificationRecord>(&query)
            .bind(id)
            .bind(feedback.user_confirmed)
            .bind(&feedback.user_feedback)
            .fetch_optional(pool)
            .await
    }
}
