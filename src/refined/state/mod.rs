//! # Query State Layer
//!
//! This module defines the seam between the refinement core and the host search
//! client. The [`QueryState`] trait is everything the extractor and the clearers
//! need from a query state: a flat report of the active refinements, and one pure
//! removal operation per refinement kind.
//!
//! ## Purity
//!
//! Every mutator takes `&self` and returns a new state. Nothing in this crate
//! changes a state in place; the caller decides when a new state replaces the live
//! one (see [`SearchHelper`]).
//!
//! ## Implementations
//!
//! - [`search_state::SearchState`]: serde-backed value type mirroring the usual
//!   search-parameters layout (facet, disjunctive, hierarchical, exclude, numeric and
//!   tag refinements plus the free-text query).
//! - [`helper::LocalHelper`]: in-process [`SearchHelper`] that records searches
//!   instead of executing them.

use crate::model::{NumericOperator, RawRefinement};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod helper;
pub mod search_state;

pub use helper::{LocalHelper, SearchHelper};
pub use search_state::SearchState;

/// Facet statistics for one attribute, as returned with search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetStats {
    #[serde(default)]
    pub counts: BTreeMap<String, u64>,
    #[serde(default = "default_exhaustive")]
    pub exhaustive: bool,
}

fn default_exhaustive() -> bool {
    true
}

/// Result metadata used to decorate refinements with counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    #[serde(default)]
    pub nb_hits: u64,
    #[serde(default)]
    pub facets: BTreeMap<String, FacetStats>,
}

impl SearchResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the count of one facet value.
    pub fn with_facet_count(
        mut self,
        attribute: impl Into<String>,
        value: impl Into<String>,
        count: u64,
    ) -> Self {
        self.facets
            .entry(attribute.into())
            .or_insert_with(|| FacetStats {
                counts: BTreeMap::new(),
                exhaustive: true,
            })
            .counts
            .insert(value.into(), count);
        self
    }

    /// `(count, exhaustive)` of a facet value, when the results carry it.
    pub fn facet_count(&self, attribute: &str, value: &str) -> Option<(u64, bool)> {
        let stats = self.facets.get(attribute)?;
        stats
            .counts
            .get(value)
            .map(|count| (*count, stats.exhaustive))
    }
}

/// Operations the refinement core needs from a host query state.
pub trait QueryState: Clone {
    /// One entry per active refinement, across every kind.
    ///
    /// When `results` is given, facet-like entries carry their result counts.
    fn raw_refinements(&self, results: Option<&SearchResults>) -> Vec<RawRefinement>;

    /// Remove one conjunctive facet value.
    fn remove_facet_refinement(&self, attribute: &str, value: &str) -> Self;

    /// Remove one disjunctive facet value.
    fn remove_disjunctive_facet_refinement(&self, attribute: &str, value: &str) -> Self;

    /// Remove one excluded facet value.
    fn remove_exclude_refinement(&self, attribute: &str, value: &str) -> Self;

    /// Remove one `(operator, value)` pair from a numeric attribute.
    fn remove_numeric_refinement(
        &self,
        attribute: &str,
        operator: NumericOperator,
        value: f64,
    ) -> Self;

    /// Remove one tag.
    fn remove_tag_refinement(&self, tag: &str) -> Self;

    /// Remove every refinement, of any kind, on one attribute.
    fn clear_attribute(&self, attribute: &str) -> Self;

    /// Remove every attribute refinement (tags are not attribute refinements).
    fn clear_refinements(&self) -> Self;

    /// Remove every tag.
    fn clear_tags(&self) -> Self;

    /// Replace the free-text query.
    fn set_query(&self, query: &str) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_parse_from_json() {
        let json = r#"{
            "nbHits": 42,
            "facets": {
                "color": {"counts": {"red": 12}},
                "brand": {"counts": {"Acme": 3}, "exhaustive": false}
            }
        }"#;
        let results: SearchResults = serde_json::from_str(json).unwrap();
        assert_eq!(results.nb_hits, 42);
        assert_eq!(results.facet_count("color", "red"), Some((12, true)));
        assert_eq!(results.facet_count("brand", "Acme"), Some((3, false)));
        assert_eq!(results.facet_count("brand", "Initech"), None);
        assert_eq!(results.facet_count("size", "XL"), None);
    }

    #[test]
    fn missing_fields_default() {
        let results: SearchResults = serde_json::from_str("{}").unwrap();
        assert_eq!(results, SearchResults::new());
        assert_eq!(results.nb_hits, 0);
    }
}
