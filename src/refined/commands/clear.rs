use crate::model::{RawRefinement, RefinementKind, TAGS_ATTRIBUTE};
use crate::state::QueryState;
use tracing::debug;

/// State with one refinement removed.
///
/// Hierarchical refinements hold a single branch per attribute, so clearing one
/// clears the whole attribute. Removing a refinement that is not active returns an
/// equal state.
pub fn clear_one<S, R>(state: &S, refinement: R) -> S
where
    S: QueryState,
    R: AsRef<RawRefinement>,
{
    let r = refinement.as_ref();
    let attribute = r.attribute_name.as_str();
    let name = r.name.as_str();
    debug!(kind = r.kind.type_name(), attribute, name, "clearing refinement");

    match &r.kind {
        RefinementKind::Facet => state.remove_facet_refinement(attribute, name),
        RefinementKind::Disjunctive => state.remove_disjunctive_facet_refinement(attribute, name),
        RefinementKind::Hierarchical => state.clear_attribute(attribute),
        RefinementKind::Exclude => state.remove_exclude_refinement(attribute, name),
        RefinementKind::Numeric {
            operator,
            numeric_value,
        } => state.remove_numeric_refinement(attribute, *operator, *numeric_value),
        RefinementKind::Tag => state.remove_tag_refinement(name),
    }
}

/// State with every refinement removed, or only those on `restricted_to`.
///
/// `_tags` in the restriction list clears the tags.
pub fn clear_all<S: QueryState>(state: &S, restricted_to: &[String], also_clear_query: bool) -> S {
    debug!(
        restricted = restricted_to.len(),
        also_clear_query, "clearing all refinements"
    );

    let cleared = if restricted_to.is_empty() {
        state.clear_tags().clear_refinements()
    } else {
        restricted_to.iter().fold(state.clone(), |s, attribute| {
            if attribute == TAGS_ATTRIBUTE {
                s.clear_tags()
            } else {
                s.clear_attribute(attribute)
            }
        })
    };

    if also_clear_query {
        cleared.set_query("")
    } else {
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::extract;
    use crate::model::NumericOperator;
    use crate::state::SearchState;

    fn full_state() -> SearchState {
        SearchState::new()
            .with_query("boots")
            .add_facet_refinement("color", "red")
            .add_facet_refinement("color", "blue")
            .add_disjunctive_facet_refinement("brand", "Acme")
            .add_disjunctive_facet_refinement("brand", "Initech")
            .set_hierarchical_refinement("category", "Shoes > Boots")
            .add_exclude_refinement("size", "XL")
            .add_numeric_refinement("price", NumericOperator::Ge, 10.0)
            .add_numeric_refinement("price", NumericOperator::Le, 100.0)
            .add_tag_refinement("sale")
    }

    #[test]
    fn clear_one_removes_each_kind() {
        let state = full_state();
        let all = extract::run(None, &state, &[], false);
        assert_eq!(all.len(), 9);

        for refinement in &all {
            let next = clear_one(&state, refinement);
            let remaining = extract::run(None, &next, &[], false);
            assert!(
                !remaining.contains(refinement),
                "{} {} still present",
                refinement.attribute_name(),
                refinement.name()
            );
            assert_eq!(remaining.len(), all.len() - 1);
        }
    }

    #[test]
    fn clear_one_leaves_input_untouched() {
        let state = full_state();
        let before = state.clone();
        let _ = clear_one(&state, RawRefinement::tag("sale"));
        assert_eq!(state, before);
    }

    #[test]
    fn clear_one_is_idempotent() {
        let state = full_state();
        let r = RawRefinement::facet("color", "red");
        let once = clear_one(&state, &r);
        let twice = clear_one(&once, &r);
        assert_eq!(once, twice);
    }

    #[test]
    fn clear_one_numeric_keeps_other_pairs() {
        let state = full_state();
        let next = clear_one(
            &state,
            RawRefinement::numeric("price", NumericOperator::Ge, 10.0),
        );
        let prices: Vec<_> = extract::run(None, &next, &[], false)
            .into_iter()
            .filter(|r| r.attribute_name() == "price")
            .map(|r| r.computed_label)
            .collect();
        assert_eq!(prices, vec!["≤ 100".to_string()]);
    }

    #[test]
    fn clear_one_hierarchical_clears_attribute() {
        let state = SearchState::new().set_hierarchical_refinement("category", "A > B");
        let next = clear_one(&state, RawRefinement::hierarchical("category", "A"));
        assert!(next.is_unrefined());
    }

    #[test]
    fn clear_all_unrestricted_empties_everything() {
        let next = clear_all(&full_state(), &[], false);
        assert!(extract::run(None, &next, &[], false).is_empty());
        assert_eq!(next.query, "boots");
    }

    #[test]
    fn clear_all_restricted_only_touches_named_attributes() {
        let next = clear_all(&full_state(), &["color".to_string()], false);
        let remaining = extract::run(None, &next, &[], false);
        assert!(remaining.iter().all(|r| r.attribute_name() != "color"));
        assert_eq!(remaining.len(), 7);
    }

    #[test]
    fn clear_all_restricted_to_tags() {
        let next = clear_all(&full_state(), &[TAGS_ATTRIBUTE.to_string()], false);
        assert!(next.tag_refinements.is_empty());
        assert_eq!(next.facets_refinements.len(), 1);
    }

    #[test]
    fn clear_all_can_reset_query() {
        let next = clear_all(&full_state(), &[], true);
        assert_eq!(next.query, "");

        let next = clear_all(&full_state(), &["brand".to_string()], true);
        assert_eq!(next.query, "");
        assert!(next.disjunctive_facets_refinements.is_empty());
    }
}
