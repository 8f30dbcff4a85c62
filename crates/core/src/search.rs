//! Catalog search filters and pagination helpers.
//!
//! Used by the repository layer (SQL `ILIKE` patterns) and by the care hub,
//! which filters an in-memory catalog snapshot.

use crate::plant::{CareAttribute, CareLevel, PlantRecord};

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of plants per page.
pub const DEFAULT_PAGE_LIMIT: i64 = 12;

/// Maximum number of plants per page.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Catalog query
// ---------------------------------------------------------------------------

/// Free-text search plus an optional care-level filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Case-insensitive substring of name, scientific name, or tagline.
    pub search: Option<String>,
    pub care_level: Option<CareLevel>,
}

impl CatalogQuery {
    /// Build from raw query-string values.
    ///
    /// Blank search text is ignored. A care level of `"All"` (as sent by the
    /// care hub filter) or any unrecognised value means no care-level filter.
    pub fn from_params(search: Option<&str>, care_level: Option<&str>) -> Self {
        Self {
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            care_level: care_level.and_then(CareLevel::parse),
        }
    }

    /// Whether an active record satisfies this query.
    pub fn matches(&self, plant: &PlantRecord) -> bool {
        if let Some(level) = self.care_level {
            if plant.care_level != level {
                return false;
            }
        }
        match &self.search {
            Some(term) => {
                let term = term.to_lowercase();
                [&plant.name, &plant.scientific_name, &plant.tagline]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&term))
            }
            None => true,
        }
    }

    /// `ILIKE` pattern for the search term, with wildcards escaped.
    pub fn like_pattern(&self) -> Option<String> {
        self.search.as_deref().map(like_pattern)
    }
}

/// Active plants satisfying `query`, in catalog order.
pub fn filter_catalog<'a>(
    catalog: &'a [PlantRecord],
    query: &CatalogQuery,
) -> Vec<&'a PlantRecord> {
    catalog
        .iter()
        .filter(|p| p.is_active && query.matches(p))
        .collect()
}

/// Wrap `term` as `%term%`, escaping `\`, `%` and `_`.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
