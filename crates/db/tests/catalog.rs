use sqlx::PgPool;
use zfarming_core::catalog::CatalogProvider;
use zfarming_core::plant::{CareLevel, CareText, Space, Sunlight};
use zfarming_db::catalog::PgCatalog;
use zfarming_db::models::plant::NewPlant;
use zfarming_db::repositories::PlantRepo;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_catalog_snapshot_includes_categories(pool: PgPool) {
    let catalog = PgCatalog::new(pool);
    let plants = catalog.get_active_plants().await.unwrap();
    assert_eq!(plants.len(), 15);

    let snake = plants.iter().find(|p| p.plant_id == "snake_plant").unwrap();
    assert_eq!(snake.sunlight, Sunlight::Low);
    assert_eq!(snake.space, Space::Medium);
    assert_eq!(snake.care_level, CareLevel::Beginner);
    assert_eq!(
        snake.categories,
        vec!["Air Purifying".to_string(), "Succulents".to_string()]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_active_ignores_deactivated(pool: PgPool) {
    PlantRepo::deactivate(&pool, "basil").await.unwrap();
    let catalog = PgCatalog::new(pool);
    assert!(catalog.find_active("basil").await.unwrap().is_none());
    assert!(catalog.find_active("mint").await.unwrap().is_some());
    assert_eq!(catalog.get_active_plants().await.unwrap().len(), 14);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_snapshot_and_listing_share_case_insensitive_order(pool: PgPool) {
    let plant = NewPlant {
        plant_id: "areca_palm".to_string(),
        name: "areca palm".to_string(),
        scientific_name: "Dypsis lutescens".to_string(),
        slug: "areca-palm-dypsis-lutescens".to_string(),
        sunlight: Sunlight::Medium,
        space: Space::Medium,
        care_level: CareLevel::Intermediate,
        tagline: "Feathery indoor palm".to_string(),
        description: String::new(),
        care: CareText::default(),
        image_url: None,
        is_featured: false,
        is_beginner_friendly: false,
    };
    PlantRepo::create(&pool, &plant, &[]).await.unwrap();

    let listed: Vec<String> = PlantRepo::list_active(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.plant_id)
        .collect();
    let snapshot: Vec<String> = PgCatalog::new(pool)
        .get_active_plants()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.plant_id)
        .collect();

    assert_eq!(&snapshot[..3], ["aloe_vera", "areca_palm", "basil"]);
    assert_eq!(snapshot, listed);
}
