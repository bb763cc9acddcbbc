use super::{QueryState, SearchResults};
use crate::model::{NumericOperator, RawRefinement};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Attribute maps keep insertion order: it is the order the host applied the filters.
type ValueMap = IndexMap<String, Vec<String>>;
type NumericMap = IndexMap<String, BTreeMap<NumericOperator, Vec<f64>>>;

/// Immutable query state.
///
/// Serializes to the familiar search-parameters JSON layout:
///
/// ```json
/// {
///   "query": "shoes",
///   "facetsRefinements": {"color": ["red"]},
///   "disjunctiveFacetsRefinements": {"brand": ["Acme", "Initech"]},
///   "hierarchicalFacetsRefinements": {"category": ["Shoes > Running"]},
///   "facetsExcludes": {"size": ["XL"]},
///   "numericRefinements": {"price": {">=": [10], "<=": [100]}},
///   "tagRefinements": ["sale"]
/// }
/// ```
///
/// Removing the last value of an attribute drops the attribute entry, so a state
/// that had a refinement added and removed compares equal to one that never had it.
/// Attributes are reported and serialized in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    #[serde(default)]
    pub query: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub facets_refinements: ValueMap,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub disjunctive_facets_refinements: ValueMap,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub hierarchical_facets_refinements: ValueMap,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub facets_excludes: ValueMap,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub numeric_refinements: NumericMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_refinements: Vec<String>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(&self, query: &str) -> Self {
        Self {
            query: query.to_string(),
            ..self.clone()
        }
    }

    pub fn add_facet_refinement(&self, attribute: &str, value: &str) -> Self {
        let mut next = self.clone();
        insert_value(&mut next.facets_refinements, attribute, value);
        next
    }

    pub fn add_disjunctive_facet_refinement(&self, attribute: &str, value: &str) -> Self {
        let mut next = self.clone();
        insert_value(&mut next.disjunctive_facets_refinements, attribute, value);
        next
    }

    pub fn add_exclude_refinement(&self, attribute: &str, value: &str) -> Self {
        let mut next = self.clone();
        insert_value(&mut next.facets_excludes, attribute, value);
        next
    }

    /// Hierarchical facets hold a single active branch, so this replaces any
    /// existing path for the attribute.
    pub fn set_hierarchical_refinement(&self, attribute: &str, path: &str) -> Self {
        let mut next = self.clone();
        next.hierarchical_facets_refinements
            .insert(attribute.to_string(), vec![path.to_string()]);
        next
    }

    pub fn add_numeric_refinement(
        &self,
        attribute: &str,
        operator: NumericOperator,
        value: f64,
    ) -> Self {
        let mut next = self.clone();
        let values = next
            .numeric_refinements
            .entry(attribute.to_string())
            .or_default()
            .entry(operator)
            .or_default();
        if !values.iter().any(|v| same_number(*v, value)) {
            values.push(value);
        }
        next
    }

    pub fn add_tag_refinement(&self, tag: &str) -> Self {
        let mut next = self.clone();
        if !next.tag_refinements.iter().any(|t| t == tag) {
            next.tag_refinements.push(tag.to_string());
        }
        next
    }

    /// True when no refinement of any kind is active (the query is ignored).
    pub fn is_unrefined(&self) -> bool {
        self.facets_refinements.is_empty()
            && self.disjunctive_facets_refinements.is_empty()
            && self.hierarchical_facets_refinements.is_empty()
            && self.facets_excludes.is_empty()
            && self.numeric_refinements.is_empty()
            && self.tag_refinements.is_empty()
    }
}

fn insert_value(map: &mut ValueMap, attribute: &str, value: &str) {
    let values = map.entry(attribute.to_string()).or_default();
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

fn remove_value(map: &mut ValueMap, attribute: &str, value: &str) {
    if let Some(values) = map.get_mut(attribute) {
        values.retain(|v| v != value);
        if values.is_empty() {
            map.shift_remove(attribute);
        }
    }
}

/// Numeric equality where NaN matches NaN, so every stored value can be removed.
fn same_number(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn counted(raw: RawRefinement, results: Option<&SearchResults>) -> RawRefinement {
    match results.and_then(|r| r.facet_count(&raw.attribute_name, &raw.name)) {
        Some((count, exhaustive)) => raw.with_count(count, exhaustive),
        None => raw,
    }
}

impl QueryState for SearchState {
    fn raw_refinements(&self, results: Option<&SearchResults>) -> Vec<RawRefinement> {
        let mut out = Vec::new();

        for (attribute, values) in &self.facets_refinements {
            for value in values {
                out.push(counted(RawRefinement::facet(attribute, value), results));
            }
        }
        for (attribute, values) in &self.facets_excludes {
            for value in values {
                out.push(RawRefinement::exclude(attribute, value));
            }
        }
        for (attribute, values) in &self.disjunctive_facets_refinements {
            for value in values {
                out.push(counted(
                    RawRefinement::disjunctive(attribute, value),
                    results,
                ));
            }
        }
        for (attribute, paths) in &self.hierarchical_facets_refinements {
            for path in paths {
                out.push(counted(
                    RawRefinement::hierarchical(attribute, path),
                    results,
                ));
            }
        }
        for (attribute, operators) in &self.numeric_refinements {
            for (operator, values) in operators {
                for value in values {
                    out.push(RawRefinement::numeric(attribute, *operator, *value));
                }
            }
        }
        for tag in &self.tag_refinements {
            out.push(RawRefinement::tag(tag));
        }

        out
    }

    fn remove_facet_refinement(&self, attribute: &str, value: &str) -> Self {
        let mut next = self.clone();
        remove_value(&mut next.facets_refinements, attribute, value);
        next
    }

    fn remove_disjunctive_facet_refinement(&self, attribute: &str, value: &str) -> Self {
        let mut next = self.clone();
        remove_value(&mut next.disjunctive_facets_refinements, attribute, value);
        next
    }

    fn remove_exclude_refinement(&self, attribute: &str, value: &str) -> Self {
        let mut next = self.clone();
        remove_value(&mut next.facets_excludes, attribute, value);
        next
    }

    fn remove_numeric_refinement(
        &self,
        attribute: &str,
        operator: NumericOperator,
        value: f64,
    ) -> Self {
        let mut next = self.clone();
        if let Some(operators) = next.numeric_refinements.get_mut(attribute) {
            if let Some(values) = operators.get_mut(&operator) {
                values.retain(|v| !same_number(*v, value));
                if values.is_empty() {
                    operators.remove(&operator);
                }
            }
            if operators.is_empty() {
                next.numeric_refinements.shift_remove(attribute);
            }
        }
        next
    }

    fn remove_tag_refinement(&self, tag: &str) -> Self {
        let mut next = self.clone();
        next.tag_refinements.retain(|t| t != tag);
        next
    }

    fn clear_attribute(&self, attribute: &str) -> Self {
        let mut next = self.clone();
        next.facets_refinements.shift_remove(attribute);
        next.disjunctive_facets_refinements.shift_remove(attribute);
        next.hierarchical_facets_refinements.shift_remove(attribute);
        next.facets_excludes.shift_remove(attribute);
        next.numeric_refinements.shift_remove(attribute);
        next
    }

    fn clear_refinements(&self) -> Self {
        Self {
            query: self.query.clone(),
            tag_refinements: self.tag_refinements.clone(),
            ..Self::default()
        }
    }

    fn clear_tags(&self) -> Self {
        Self {
            tag_refinements: Vec::new(),
            ..self.clone()
        }
    }

    fn set_query(&self, query: &str) -> Self {
        self.with_query(query)
    }
}
