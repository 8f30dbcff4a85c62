//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod care_guide_repo;
pub mod category_repo;
pub mod identification_repo;
pub mod plant_repo;

pub use care_guide_repo::CareGuideRepo;
pub use category_repo::CategoryRepo;
pub use identification_repo::IdentificationRepo;
pub use plant_repo::PlantRepo;
