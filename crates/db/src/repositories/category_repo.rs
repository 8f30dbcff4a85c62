//! Repository for the `categories` table and the `plant_categories` junction.

use sqlx::PgPool;
use zfarming_core::types::DbId;

use crate::models::category::{Category, CategoryWithCount, PlantCategoryName};
use crate::models::plant::Plant;

/// Column list for categories queries.
const COLUMNS: &str = "id, name, slug, description, created_at, updated_at";

/// Plant columns qualified with the `p` alias.
const PLANT_COLUMNS: &str = "p.id, p.plant_id, p.name, p.scientific_name, p.slug, p.sunlight, \
    p.space, p.care_level, p.tagline, p.description, p.watering_frequency, p.pot_size, \
    p.sunlight_needs, p.watering_guide, p.sunlight_guide, p.potting_tips, p.common_issues, \
    p.image_url, p.is_active, p.is_featured, p.is_beginner_friendly, p.created_at, p.updated_at";

/// Provides read access to categories and manages plant links.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List all categories with their active plant counts, ordered by name.
    pub async fn list_with_counts(pool: &PgPool) -> Result<Vec<CategoryWithCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryWithCount>(
            "SELECT c.id, c.name, c.slug, c.description, \
                    COUNT(p.id) FILTER (WHERE p.is_active) AS plant_count \
             FROM categories c \
             LEFT JOIN plant_categories pc ON pc.category_id = c.id \
             LEFT JOIN plants p ON p.id = pc.plant_id \
             GROUP BY c.id \
             ORDER BY c.name ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Find a category by slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE slug = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Find all categories whose slug is in `slugs`.
    pub async fn find_by_slugs(
        pool: &PgPool,
        slugs: &[String],
    ) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE slug = ANY($1) ORDER BY name");
        sqlx::query_as::<_, Category>(&query)
            .bind(slugs)
            .fetch_all(pool)
            .await
    }

    /// Active plants linked to a category, ordered by name ascending.
    pub async fn list_active_plants(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<Plant>, sqlx::Error> {
        let query = format!(
            "SELECT {PLANT_COLUMNS} \
             FROM plants p \
             JOIN plant_categories pc ON pc.plant_id = p.id \
             WHERE pc.category_id = $1 AND p.is_active = true \
             ORDER BY LOWER(p.name) ASC, p.name ASC, p.id ASC"
        );
        sqlx::query_as::<_, Plant>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Category names for each of the given plant row IDs, ordered by name.
    pub async fn names_for_plants(
        pool: &PgPool,
        plant_ids: &[DbId],
    ) -> Result<Vec<PlantCategoryName>, sqlx::Error> {
        sqlx::query_as::<_, PlantCategoryName>(
            "SELECT pc.plant_id, c.name \
             FROM plant_categories pc \
             JOIN categories c ON c.id = pc.category_id \
             WHERE pc.plant_id = ANY($1) \
             ORDER BY pc.plant_id, c.name",
        )
        .bind(plant_ids)
        .fetch_all(pool)
        .await
    }

    /// Replace category links within an existing transaction.
    pub(crate) async fn set_plant_categories_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        plant_id: DbId,
        category_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM plant_categories WHERE plant_id = $1")
            .bind(plant_id)
            .execute(&mut **tx)
            .await?;

        if !category_ids.is_empty() {
            sqlx::query(
                "INSERT INTO plant_categories (plant_id, category_id) \
                 SELECT $1, UNNEST($2::bigint[]) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(plant_id)
            .bind(category_ids)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}
