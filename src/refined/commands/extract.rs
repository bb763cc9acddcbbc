//! Refinement extraction: enumerate, order, filter and label.
//!
//! Ordering is by attribute priority, then by refinement name. Declared attributes
//! come first, in declaration order. Attributes nobody declared follow in the order
//! the query state first reported them.

use super::label::label;
use crate::model::{RawRefinement, Refinement};
use crate::state::{QueryState, SearchResults};
use std::collections::HashMap;
use tracing::{debug, trace};

pub fn run<S: QueryState>(
    results: Option<&SearchResults>,
    state: &S,
    attribute_names: &[String],
    only_listed_attributes: bool,
) -> Vec<Refinement> {
    let raw = state.raw_refinements(results);
    let total = raw.len();

    let mut sorted = sort_refinements(raw, attribute_names);

    // An empty allow-list means "no restriction", not "allow nothing".
    if only_listed_attributes && !attribute_names.is_empty() {
        sorted.retain(|r| {
            let listed = attribute_names.contains(&r.attribute_name);
            if !listed {
                trace!(attribute = %r.attribute_name, name = %r.name, "dropping unlisted refinement");
            }
            listed
        });
    }

    let refinements: Vec<Refinement> = sorted.into_iter().map(label).collect();
    debug!(
        total,
        kept = refinements.len(),
        only_listed_attributes,
        "extracted refinements"
    );
    refinements
}

/// Attribute names reported by `raw` but not declared, deduplicated, in
/// first-occurrence order.
pub fn other_attribute_names(raw: &[RawRefinement], attribute_names: &[String]) -> Vec<String> {
    let mut others: Vec<String> = Vec::new();
    for refinement in raw {
        let name = &refinement.attribute_name;
        if !attribute_names.contains(name) && !others.contains(name) {
            others.push(name.clone());
        }
    }
    others
}

/// Stable sort by attribute priority, then lexicographically by name.
pub fn sort_refinements(
    mut raw: Vec<RawRefinement>,
    attribute_names: &[String],
) -> Vec<RawRefinement> {
    let others = other_attribute_names(&raw, attribute_names);

    let mut priority: HashMap<&str, usize> = HashMap::new();
    for name in attribute_names.iter().chain(others.iter()) {
        let next = priority.len();
        priority.entry(name.as_str()).or_insert(next);
    }

    raw.sort_by(|a, b| {
        let pa = priority.get(a.attribute_name.as_str()).copied().unwrap_or(usize::MAX);
        let pb = priority.get(b.attribute_name.as_str()).copied().unwrap_or(usize::MAX);
        pa.cmp(&pb).then_with(|| a.name.cmp(&b.name))
    });
    raw
}
