//! Wire data model for the search and detail services.
//!
//! All types are fully owned (no borrowed lifetimes) so payloads can cross
//! task boundaries and be stored in app state without arena allocation.
//!
//! Deserialization is deliberately lenient: the service's three historical
//! revisions disagree on field spellings (`repo_name` vs `title`) and
//! routinely omit counts or the description. Missing fields degrade to
//! explicit defaults instead of failing the whole payload.

use std::collections::BTreeMap;

use serde::Deserialize;

/// One entry of a `/search` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    /// Project identifier, also used as the detail-request key.
    #[serde(alias = "repo_name", alias = "title")]
    pub name: String,
    /// External project link (usually a GitHub repository URL).
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub watchers: u64,
}

impl SearchResult {
    /// Description with the explicit fallback used wherever the card renders.
    pub fn description_or_fallback(&self) -> &str {
        if self.description.is_empty() {
            "No description available"
        } else {
            &self.description
        }
    }
}

/// Envelope of a `/search` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// Full payload of a `/project_details` response.
///
/// `analysis`, `category`, and `report` are produced by optional backend
/// stages; each is rendered only when present.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectDetail {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub watchers: u64,
    /// ISO-8601 creation timestamp as reported by the service.
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub last_commit: String,
    /// Language name → byte count. BTreeMap keeps legend ordering stable
    /// across identical payloads.
    #[serde(default)]
    pub languages: BTreeMap<String, u64>,
    #[serde(default, rename = "analysis_result")]
    pub analysis: Option<ProjectAnalysis>,
    #[serde(default, rename = "category_result")]
    pub category: Option<ProjectCategory>,
    #[serde(default, rename = "report_result")]
    pub report: Option<ProjectReport>,
}

impl ProjectDetail {
    pub fn description_or_fallback(&self) -> &str {
        if self.description.is_empty() {
            "No description available"
        } else {
            &self.description
        }
    }
}

/// Per-project activity/quality scoring block.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectAnalysis {
    #[serde(default)]
    pub activity_score: f64,
    #[serde(default)]
    pub code_quality_score: f64,
    #[serde(default)]
    pub complexity_level: String,
    #[serde(default)]
    pub maintenance_status: String,
}

/// Classification block: one primary category plus optional extras.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectCategory {
    #[serde(default)]
    pub primary_category: String,
    #[serde(default)]
    pub secondary_categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Free-form recommendation report block.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectReport {
    /// Star rating rendered by the service as repeated "⭐️" glyphs.
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub recommendation_reason: String,
}

impl ProjectReport {
    /// Number of filled stars in `rating`, clamped to 0..=5.
    pub fn star_count(&self) -> usize {
        self.rating.matches('⭐').count().min(5)
    }
}

/// Response of `/process_selected`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessOutcome {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub processed_urls: Vec<String>,
}

/// One language's share of a repository, for the proportional bar and legend.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageShare {
    pub name: String,
    pub bytes: u64,
    /// Share of total bytes, 0.0..=100.0.
    pub percent: f64,
}

/// Computes per-language percentage shares, sorted descending by share.
///
/// An empty map (or one whose counts sum to zero) yields an empty vec, which
/// callers treat as "omit the language section".
pub fn language_breakdown(languages: &BTreeMap<String, u64>) -> Vec<LanguageShare> {
    let total: u64 = languages.values().sum();
    if total == 0 {
        return Vec::new();
    }
    let mut shares: Vec<LanguageShare> = languages
        .iter()
        .map(|(name, &bytes)| LanguageShare {
            name: name.clone(),
            bytes,
            percent: bytes as f64 / total as f64 * 100.0,
        })
        .collect();
    // Descending by share; name as tiebreaker so equal shares stay stable.
    shares.sort_by(|a, b| {
        b.percent
            .partial_cmp(&a.percent)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    shares
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_result_accepts_legacy_field_names() {
        let r: SearchResult =
            serde_json::from_str(r#"{"repo_name":"A","url":"http://x/a","stars":5}"#).unwrap();
        assert_eq!(r.name, "A");
        assert_eq!(r.stars, 5);
        assert_eq!(r.forks, 0);
        assert_eq!(r.description_or_fallback(), "No description available");
    }

    #[test]
    fn detail_optional_sections_default_to_none() {
        let d: ProjectDetail = serde_json::from_str(
            r#"{"description":"d","stars":1,"languages":{"Rust":10,"Shell":30}}"#,
        )
        .unwrap();
        assert!(d.analysis.is_none());
        assert!(d.category.is_none());
        assert!(d.report.is_none());
        assert_eq!(d.created_at, "");
    }

    #[test]
    fn language_breakdown_sorts_descending() {
        let mut langs = BTreeMap::new();
        langs.insert("Rust".to_owned(), 75u64);
        langs.insert("Shell".to_owned(), 25u64);
        let shares = language_breakdown(&langs);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].name, "Rust");
        assert!((shares[0].percent - 75.0).abs() < 1e-9);
        assert_eq!(shares[1].name, "Shell");
    }

    #[test]
    fn language_breakdown_empty_map_is_empty() {
        assert!(language_breakdown(&BTreeMap::new()).is_empty());
        let mut zeroed = BTreeMap::new();
        zeroed.insert("Rust".to_owned(), 0u64);
        assert!(language_breakdown(&zeroed).is_empty());
    }

    #[test]
    fn report_star_count_parses_emoji_rating() {
        let report = ProjectReport {
            rating: "⭐️⭐️⭐️".to_owned(),
            summary: String::new(),
            recommendation_reason: String::new(),
        };
        assert_eq!(report.star_count(), 3);
    }
}
