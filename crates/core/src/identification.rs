//! Plant identification reconciliation and mock fallback.
//!
//! An identification provider returns ranked free-text suggestions such as
//! `"Snake Plant (Sansevieria trifasciata)"`. [`reconcile`] maps each of
//! the top suggestions onto a catalog record, and [`identify`] composes the
//! provider call with the deterministic mock fallback used whenever the
//! provider is unavailable.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::plant::PlantRecord;

/// Maximum number of input suggestions considered by [`reconcile`].
pub const MAX_SUGGESTIONS: usize = 5;

/// Confidences assigned to mock results, in rank order.
pub const MOCK_CONFIDENCES: [f64; 3] = [0.89, 0.76, 0.65];

// ---------------------------------------------------------------------------
// Provider boundary
// ---------------------------------------------------------------------------

/// Why the identification provider could not produce suggestions.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// No API key or endpoint configured.
    #[error("Identification provider is not configured")]
    NotConfigured,

    /// Network failure, DNS failure, or timeout.
    #[error("Identification request failed: {0}")]
    Request(String),

    /// The provider answered with a non-2xx status.
    #[error("Identification provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The provider answered 2xx with a body we could not decode.
    #[error("Invalid identification response: {0}")]
    InvalidResponse(String),
}

/// One candidate identification as produced by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentificationSuggestion {
    pub raw_name: String,
    pub probability: f64,
    #[serde(default)]
    pub structured_scientific_name: Option<String>,
    #[serde(default)]
    pub common_name_aliases: Vec<String>,
}

impl IdentificationSuggestion {
    pub fn new(raw_name: impl Into<String>, probability: f64) -> Self {
        Self {
            raw_name: raw_name.into(),
            probability,
            structured_scientific_name: None,
            common_name_aliases: Vec::new(),
        }
    }

    /// Common name: the raw name up to its first `(`, trimmed.
    pub fn common_name(&self) -> &str {
        extract_common_name(&self.raw_name)
    }

    /// Scientific name, preferring the structured field over the
    /// parenthesised part of the raw name. Empty when neither is present.
    pub fn scientific_name(&self) -> &str {
        self.structured_scientific_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| extract_scientific_name(&self.raw_name).unwrap_or(""))
    }

    /// A suggestion with no usable name at all cannot be matched or shown.
    fn is_malformed(&self) -> bool {
        self.common_name().is_empty()
            && self.scientific_name().is_empty()
            && self.common_name_aliases.iter().all(|a| a.trim().is_empty())
    }
}

/// Source of identification suggestions for an uploaded image.
///
/// Implementations issue a single request bounded by their own timeout and
/// never retry.
#[async_trait]
pub trait IdentificationProvider: Send + Sync {
    async fn fetch_suggestions(
        &self,
        image: &[u8],
    ) -> Result<Vec<IdentificationSuggestion>, UpstreamError>;
}

// ---------------------------------------------------------------------------
// Name extraction
// ---------------------------------------------------------------------------

/// Text before the first `(`, trimmed; the whole string when there is none.
pub fn extract_common_name(raw: &str) -> &str {
    match raw.find('(') {
        Some(idx) => raw[..idx].trim(),
        None => raw.trim(),
    }
}

/// Text inside the first `(...)` pair, trimmed.
///
/// Returns `None` when there is no closing parenthesis after the first `(`
/// or the enclosed text is blank.
pub fn extract_scientific_name(raw: &str) -> Option<&str> {
    let open = raw.find('(')?;
    let rest = &raw[open + 1..];
    let close = rest.find(')')?;
    Some(rest[..close].trim()).filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// A suggestion reconciled against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub raw_name: String,
    pub display_name: String,
    pub scientific_name: String,
    /// Probability in `[0, 1]`.
    pub confidence: f64,
    /// `confidence` as a whole percentage.
    pub confidence_percent: u8,
    pub matched_plant_id: Option<String>,
}

/// Reconciled results plus whether they came from the mock fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentificationOutcome {
    pub results: Vec<MatchResult>,
    pub is_mock: bool,
}

impl IdentificationOutcome {
    /// Highest-ranked result, if any.
    pub fn best(&self) -> Option<&MatchResult> {
        self.results.first()
    }
}

/// Map the top [`MAX_SUGGESTIONS`] suggestions onto the catalog, preserving
/// input order. Malformed suggestions are skipped.
pub fn reconcile(
    suggestions: &[IdentificationSuggestion],
    catalog: &[PlantRecord],
) -> Vec<MatchResult> {
    suggestions
        .iter()
        .take(MAX_SUGGESTIONS)
        .filter_map(|suggestion| {
            if suggestion.is_malformed() {
                tracing::warn!(
                    raw_name = %suggestion.raw_name,
                    "Skipping identification suggestion without a usable name"
                );
                return None;
            }
            let matched = find_matching_plant(suggestion, catalog);
            Some(build_result(suggestion, matched))
        })
        .collect()
}

/// Find the catalog record a suggestion refers to, if any.
///
/// Tiers, first hit wins, active records only:
/// 1. display name equals a name term (common name, raw name, aliases)
/// 2. scientific name equals the scientific term, then any name term
/// 3. display name contains a term
///
/// All comparisons are case-insensitive.
pub fn find_matching_plant<'a>(
    suggestion: &IdentificationSuggestion,
    catalog: &'a [PlantRecord],
) -> Option<&'a PlantRecord> {
    let names = name_terms(suggestion);
    let scientific = suggestion.scientific_name().to_lowercase();
    let active = || catalog.iter().filter(|p| p.is_active);

    for term in &names {
        if let Some(plant) = active().find(|p| p.name.to_lowercase() == *term) {
            return Some(plant);
        }
    }

    let scientific_terms = std::iter::once(&scientific)
        .filter(|s| !s.is_empty())
        .chain(names.iter());
    for term in scientific_terms {
        if let Some(plant) = active().find(|p| p.scientific_name.to_lowercase() == *term) {
            return Some(plant);
        }
    }

    for term in names.iter().chain(std::iter::once(&scientific)) {
        if term.is_empty() {
            continue;
        }
        let hit = active().find(|p| p.name.to_lowercase().contains(term.as_str()));
        if let Some(plant) = hit {
            return Some(plant);
        }
    }

    None
}

/// Lowercased, de-duplicated, non-empty name terms in priority order.
fn name_terms(suggestion: &IdentificationSuggestion) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    let candidates = [suggestion.common_name(), suggestion.raw_name.trim()]
        .into_iter()
        .chain(suggestion.common_name_aliases.iter().map(|a| a.trim()));
    for candidate in candidates {
        let term = candidate.to_lowercase();
        if !term.is_empty() && !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

fn build_result(
    suggestion: &IdentificationSuggestion,
    matched: Option<&PlantRecord>,
) -> MatchResult {
    let confidence = clamp_probability(suggestion.probability);
    let common = suggestion.common_name();
    let display_name = if common.is_empty() {
        matched.map_or_else(
            || suggestion.scientific_name().to_string(),
            |p| p.name.clone(),
        )
    } else {
        common.to_string()
    };

    MatchResult {
        raw_name: suggestion.raw_name.clone(),
        display_name,
        scientific_name: suggestion.scientific_name().to_string(),
        confidence,
        confidence_percent: (confidence * 100.0).round() as u8,
        matched_plant_id: matched.map(|p| p.plant_id.clone()),
    }
}

/// Clamp into `[0, 1]`; non-finite probabilities become `0`.
pub fn clamp_probability(probability: f64) -> f64 {
    if probability.is_finite() {
        probability.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Mock fallback
// ---------------------------------------------------------------------------

/// Deterministic stand-in suggestions drawn from the first active records.
///
/// Yields at most [`MOCK_CONFIDENCES`]`.len()` suggestions with fixed,
/// descending confidences.
pub fn mock_suggestions(catalog: &[PlantRecord]) -> Vec<IdentificationSuggestion> {
    catalog
        .iter()
        .filter(|p| p.is_active)
        .zip(MOCK_CONFIDENCES)
        .map(|(plant, confidence)| IdentificationSuggestion {
            raw_name: format!("{} ({})", plant.name, plant.scientific_name),
            probability: confidence,
            structured_scientific_name: Some(plant.scientific_name.clone()),
            common_name_aliases: vec![plant.name.clone()],
        })
        .collect()
}

/// Mock outcome for a catalog snapshot, flagged with `is_mock = true`.
pub fn mock_outcome(catalog: &[PlantRecord]) -> IdentificationOutcome {
    IdentificationOutcome {
        results: reconcile(&mock_suggestions(catalog), catalog),
        is_mock: true,
    }
}

/// Identify an image via `provider`, falling back to [`mock_outcome`] on
/// any upstream failure.
pub async fn identify(
    provider: &dyn IdentificationProvider,
    catalog: &[PlantRecord],
    image: &[u8],
) -> IdentificationOutcome {
    match provider.fetch_suggestions(image).await {
        Ok(suggestions) => IdentificationOutcome {
            results: reconcile(&suggestions, catalog),
            is_mock: false,
        },
        Err(UpstreamError::NotConfigured) => {
            tracing::warn!("Identification provider not configured, using mock results");
            mock_outcome(catalog)
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Identification provider unavailable, using mock results"
            );
            mock_outcome(catalog)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::plant::fixtures;

    struct StaticProvider(Result<Vec<IdentificationSuggestion>, fn() -> UpstreamError>);

    #[async_trait]
    impl IdentificationProvider for StaticProvider {
        async fn fetch_suggestions(
            &self,
            _image: &[u8],
        ) -> Result<Vec<IdentificationSuggestion>, UpstreamError> {
            match &self.0 {
                Ok(s) => Ok(s.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    // -- Name extraction -----------------------------------------------------

    #[test]
    fn extracts_common_and_scientific_names() {
        let raw = "Snake Plant (Sansevieria trifasciata)";
        assert_eq!(extract_common_name(raw), "Snake Plant");
        assert_eq!(extract_scientific_name(raw), Some("Sansevieria trifasciata"));
    }

    #[test]
    fn plain_name_has_no_scientific_part() {
        assert_eq!(extract_common_name(" Basil "), "Basil");
        assert_eq!(extract_scientific_name("Basil"), None);
        assert_eq!(extract_scientific_name("Basil (unclosed"), None);
        assert_eq!(extract_scientific_name("Basil ( )"), None);
    }

    #[test]
    fn only_first_parenthesised_segment_is_used() {
        let raw = "Mint (Mentha) (spearmint)";
        assert_eq!(extract_scientific_name(raw), Some("Mentha"));
    }

    #[test]
    fn structured_scientific_name_wins() {
        let mut s = IdentificationSuggestion::new("Snake Plant (Sansevieria)", 0.9);
        assert_eq!(s.scientific_name(), "Sansevieria");
        s.structured_scientific_name = Some("Dracaena trifasciata".to_string());
        assert_eq!(s.scientific_name(), "Dracaena trifasciata");
        s.structured_scientific_name = Some("  ".to_string());
        assert_eq!(s.scientific_name(), "Sansevieria");
    }

    // -- Matching ------------------------------------------------------------

    #[test]
    fn matches_by_common_name() {
        let catalog = fixtures::catalog();
        let s = IdentificationSuggestion::new("Snake Plant (Sansevieria trifasciata)", 0.91);
        let results = reconcile(&[s], &catalog);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].matched_plant_id.as_deref(), Some("snake_plant"));
        assert_eq!(results[0].display_name, "Snake Plant");
        assert_eq!(results[0].scientific_name, "Sansevieria trifasciata");
        assert_eq!(results[0].confidence_percent, 91);
    }

    #[test]
    fn matches_case_insensitively() {
        let catalog = fixtures::catalog();
        let s = IdentificationSuggestion::new("SPIDER PLANT", 0.5);
        let found = find_matching_plant(&s, &catalog).map(|p| p.plant_id.as_str());
        assert_eq!(found, Some("spider_plant"));
    }

    #[test]
    fn matches_by_scientific_name() {
        let catalog = fixtures::catalog();
        let s = IdentificationSuggestion::new(
            "Mother-in-law's Tongue (sansevieria trifasciata)",
            0.7,
        );
        let found = find_matching_plant(&s, &catalog).map(|p| p.plant_id.as_str());
        assert_eq!(found, Some("snake_plant"));
    }

    #[test]
    fn matches_structured_scientific_name() {
        let catalog = fixtures::catalog();
        let mut s = IdentificationSuggestion::new("Ocimum basilicum", 0.8);
        s.structured_scientific_name = Some("Ocimum basilicum".to_string());
        let found = find_matching_plant(&s, &catalog).map(|p| p.plant_id.as_str());
        assert_eq!(found, Some("basil"));
    }

    #[test]
    fn matches_through_alias() {
        let catalog = fixtures::catalog();
        let mut s = IdentificationSuggestion::new("Chlorophytum", 0.6);
        s.common_name_aliases = vec!["airplane plant".to_string(), "Spider Plant".to_string()];
        let found = find_matching_plant(&s, &catalog).map(|p| p.plant_id.as_str());
        assert_eq!(found, Some("spider_plant"));
    }

    #[test]
    fn substring_match_is_catalog_name_contains_term() {
        let catalog = fixtures::catalog();
        let s = IdentificationSuggestion::new("Tomatoes", 0.4);
        let found = find_matching_plant(&s, &catalog).map(|p| p.plant_id.as_str());
        assert_eq!(found, Some("cherry_tomatoes"));

        // The reverse direction (term contains catalog name) does not match.
        let s = IdentificationSuggestion::new("Wild Mint Variety Extra", 0.4);
        assert!(find_matching_plant(&s, &catalog).is_none());
    }

    #[test]
    fn exact_name_beats_earlier_substring_hit() {
        let mut catalog = fixtures::catalog();
        catalog.insert(
            0,
            fixtures::plant(
                "african_basil",
                "African Basil",
                "Ocimum gratissimum",
                crate::plant::Sunlight::Bright,
                crate::plant::Space::Medium,
                crate::plant::CareLevel::Intermediate,
            ),
        );
        let s = IdentificationSuggestion::new("Basil", 0.8);
        let found = find_matching_plant(&s, &catalog).map(|p| p.plant_id.as_str());
        assert_eq!(found, Some("basil"));
    }

    #[test]
    fn inactive_plants_are_not_matched() {
        let mut catalog = fixtures::catalog();
        for p in catalog.iter_mut().filter(|p| p.plant_id == "snake_plant") {
            p.is_active = false;
        }
        let s = IdentificationSuggestion::new("Snake Plant (Sansevieria trifasciata)", 0.9);
        assert!(find_matching_plant(&s, &catalog).is_none());
    }

    #[test]
    fn unmatched_suggestion_keeps_confidence() {
        let catalog = fixtures::catalog();
        let s = IdentificationSuggestion::new("Monstera (Monstera deliciosa)", 0.42);
        let results = reconcile(&[s], &catalog);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].matched_plant_id, None);
        assert!((results[0].confidence - 0.42).abs() < f64::EPSILON);
        assert_eq!(results[0].confidence_percent, 42);
    }

    #[test]
    fn caps_at_five_and_preserves_order() {
        let catalog = fixtures::catalog();
        let suggestions: Vec<_> = (0..10)
            .map(|i| {
                IdentificationSuggestion::new(format!("Unknown {i}"), 1.0 - i as f64 * 0.05)
            })
            .collect();
        let results = reconcile(&suggestions, &catalog);
        assert_eq!(results.len(), MAX_SUGGESTIONS);
        let names: Vec<_> = results.iter().map(|r| r.raw_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Unknown 0", "Unknown 1", "Unknown 2", "Unknown 3", "Unknown 4"]
        );
    }

    #[test]
    fn malformed_suggestion_is_skipped() {
        let catalog = fixtures::catalog();
        let suggestions = vec![
            IdentificationSuggestion::new("   ", 0.9),
            IdentificationSuggestion::new("Mint", 0.8),
        ];
        let results = reconcile(&suggestions, &catalog);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].matched_plant_id.as_deref(), Some("mint"));
    }

    #[test]
    fn scientific_only_suggestion_is_not_malformed() {
        let catalog = fixtures::catalog();
        let mut s = IdentificationSuggestion::new("", 0.3);
        s.structured_scientific_name = Some("Mentha".to_string());
        let results = reconcile(&[s], &catalog);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].display_name, "Mint");
        assert_eq!(results[0].matched_plant_id.as_deref(), Some("mint"));
    }

    #[test]
    fn probability_is_clamped() {
        assert_eq!(clamp_probability(1.7), 1.0);
        assert_eq!(clamp_probability(-0.2), 0.0);
        assert_eq!(clamp_probability(f64::NAN), 0.0);
    }

    // -- Mock fallback -------------------------------------------------------

    #[test]
    fn mock_uses_first_three_active_plants() {
        let catalog = fixtures::catalog();
        let outcome = mock_outcome(&catalog);
        assert!(outcome.is_mock);
        let confidences: Vec<_> = outcome.results.iter().map(|r| r.confidence).collect();
        assert_eq!(confidences, vec![0.89, 0.76, 0.65]);
        let ids: Vec<_> = outcome
            .results
            .iter()
            .map(|r| r.matched_plant_id.as_deref())
            .collect();
        assert_eq!(
            ids,
            vec![Some("aloe_vera"), Some("basil"), Some("cherry_tomatoes")]
        );
    }

    #[test]
    fn mock_truncates_to_catalog_size() {
        let catalog: Vec<_> = fixtures::catalog().into_iter().take(2).collect();
        let outcome = mock_outcome(&catalog);
        assert_eq!(outcome.results.len(), 2);
        assert!(mock_outcome(&[]).results.is_empty());
    }

    #[tokio::test]
    async fn identify_falls_back_to_mock_on_upstream_failure() {
        let catalog = fixtures::catalog();
        let provider = StaticProvider(Err(|| UpstreamError::Status {
            status: 503,
            body: "unavailable".to_string(),
        }));
        let outcome = identify(&provider, &catalog, b"jpeg").await;
        assert!(outcome.is_mock);
        assert_eq!(outcome.results.len(), 3);
        assert_eq!(outcome.best().map(|r| r.confidence), Some(0.89));
    }

    #[tokio::test]
    async fn identify_falls_back_when_not_configured() {
        let catalog = fixtures::catalog();
        let provider = StaticProvider(Err(|| UpstreamError::NotConfigured));
        let outcome = identify(&provider, &catalog, b"jpeg").await;
        assert!(outcome.is_mock);
    }

    #[tokio::test]
    async fn identify_reconciles_live_results() {
        let catalog = fixtures::catalog();
        let provider = StaticProvider(Ok(vec![
            IdentificationSuggestion::new("Peace Lily (Spathiphyllum wallisii)", 0.81),
            IdentificationSuggestion::new("Calathea (Goeppertia)", 0.12),
        ]));
        let outcome = identify(&provider, &catalog, b"jpeg").await;
        assert!(!outcome.is_mock);
        assert_eq!(outcome.results.len(), 2);
        assert_matches!(outcome.results[0].matched_plant_id.as_deref(), Some("peace_lily"));
        assert_matches!(outcome.results[1].matched_plant_id, None);
    }
}
