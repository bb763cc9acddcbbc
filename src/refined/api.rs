//! # API Facade
//!
//! [`CurrentRefinements`] is the widget-level entry point. It owns a validated
//! [`WidgetConfig`] and wires the pure commands to a host search client.
//!
//! ## Role and Responsibilities
//!
//! - **Validates** configuration once, at construction
//! - **Extracts** refinements on every state change and packages them as
//!   [`RenderParams`] for whatever renders them
//! - **Applies** clears through a [`SearchHelper`], then triggers the search
//!
//! ## What the API Does NOT Do
//!
//! - Ordering, labeling and clearing rules: those live in `commands/`
//! - Rendering: [`RenderParams`] is data, the caller decides what to draw
//! - URL formats: the caller supplies a [`UrlBuilder`]
//!
//! ## Lifecycle
//!
//! ```text
//! init(state)            -> RenderParams { is_first_rendering: true, .. }
//! render(results, state) -> RenderParams { is_first_rendering: false, .. }
//! clear(helper, r)       -> helper.set_state(..); helper.search()
//! ```

use crate::commands::{self, clear_all, clear_one};
use crate::config::{AttributeSpec, WidgetConfig};
use crate::error::{RefinedError, Result};
use crate::model::Refinement;
use crate::state::{QueryState, SearchHelper, SearchResults};
use std::collections::BTreeMap;
use tracing::debug;

/// Maps a state to a navigable reference (usually a URL).
pub trait UrlBuilder<S> {
    fn create_url(&self, state: &S) -> String;
}

impl<S, F> UrlBuilder<S> for F
where
    F: Fn(&S) -> String,
{
    fn create_url(&self, state: &S) -> String {
        self(state)
    }
}

/// Everything a renderer needs for one pass.
#[derive(Debug, Clone)]
pub struct RenderParams<S> {
    /// Declared attributes keyed by name
    pub attributes: BTreeMap<String, AttributeSpec>,
    pub refinements: Vec<Refinement>,
    /// State after clear-all, and its URL
    pub clear_all_state: S,
    pub clear_all_url: String,
    /// State after clearing `refinements[i]`, and its URL
    pub clear_refinement_states: Vec<S>,
    pub clear_refinement_urls: Vec<String>,
    pub is_first_rendering: bool,
}

impl<S> RenderParams<S> {
    pub fn clear_state(&self, index: usize) -> Option<&S> {
        self.clear_refinement_states.get(index)
    }

    pub fn clear_url(&self, index: usize) -> Option<&str> {
        self.clear_refinement_urls.get(index).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.refinements.is_empty()
    }
}

/// The current-refinements widget.
#[derive(Debug, Clone)]
pub struct CurrentRefinements {
    config: WidgetConfig,
    attribute_names: Vec<String>,
}

impl CurrentRefinements {
    pub fn new(config: WidgetConfig) -> Result<Self> {
        config.validate()?;
        let attribute_names = config.attribute_names();
        Ok(Self {
            config,
            attribute_names,
        })
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn attribute_names(&self) -> &[String] {
        &self.attribute_names
    }

    /// Attributes clear-all is limited to: the declared ones when only listed
    /// attributes are shown, otherwise none (meaning everything).
    pub fn restricted_to(&self) -> &[String] {
        if self.config.only_listed_attributes {
            &self.attribute_names
        } else {
            &[]
        }
    }

    pub fn refinements<S: QueryState>(
        &self,
        results: Option<&SearchResults>,
        state: &S,
    ) -> Vec<Refinement> {
        commands::extract::run(
            results,
            state,
            &self.attribute_names,
            self.config.only_listed_attributes,
        )
    }

    /// First pass, before any results exist.
    pub fn init<S, U>(&self, state: &S, urls: &U) -> RenderParams<S>
    where
        S: QueryState,
        U: UrlBuilder<S>,
    {
        self.params(None, state, urls, true)
    }

    pub fn render<S, U>(&self, results: &SearchResults, state: &S, urls: &U) -> RenderParams<S>
    where
        S: QueryState,
        U: UrlBuilder<S>,
    {
        self.params(Some(results), state, urls, false)
    }

    fn params<S, U>(
        &self,
        results: Option<&SearchResults>,
        state: &S,
        urls: &U,
        is_first_rendering: bool,
    ) -> RenderParams<S>
    where
        S: QueryState,
        U: UrlBuilder<S>,
    {
        let refinements = self.refinements(results, state);

        let clear_all_state = clear_all(state, self.restricted_to(), self.config.also_clear_query);
        let clear_all_url = urls.create_url(&clear_all_state);

        let clear_refinement_states: Vec<S> =
            refinements.iter().map(|r| clear_one(state, r)).collect();
        let clear_refinement_urls = clear_refinement_states
            .iter()
            .map(|s| urls.create_url(s))
            .collect();

        RenderParams {
            attributes: self.config.label_map(),
            refinements,
            clear_all_state,
            clear_all_url,
            clear_refinement_states,
            clear_refinement_urls,
            is_first_rendering,
        }
    }

    /// Remove one refinement from the helper's state and search again.
    pub fn clear<S, H>(&self, helper: &mut H, refinement: &Refinement)
    where
        S: QueryState,
        H: SearchHelper<S>,
    {
        let next = clear_one(helper.state(), refinement);
        helper.set_state(next);
        helper.search();
    }

    /// Remove the refinement at `index` of the current extraction.
    pub fn clear_at<S, H>(&self, helper: &mut H, index: usize) -> Result<Refinement>
    where
        S: QueryState,
        H: SearchHelper<S>,
    {
        let refinement = self
            .refinements(None, helper.state())
            .into_iter()
            .nth(index)
            .ok_or(RefinedError::IndexOutOfRange(index))?;
        self.clear(helper, &refinement);
        Ok(refinement)
    }

    /// Clear every refinement this widget shows and search again.
    pub fn clear_all<S, H>(&self, helper: &mut H)
    where
        S: QueryState,
        H: SearchHelper<S>,
    {
        let next = clear_all(
            helper.state(),
            self.restricted_to(),
            self.config.also_clear_query,
        );
        debug!("applying clear-all");
        helper.set_state(next);
        helper.search();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NumericOperator;
    use crate::state::{LocalHelper, SearchState};

    fn state() -> SearchState {
        SearchState::new()
            .with_query("boots")
            .add_facet_refinement("color", "red")
            .add_numeric_refinement("price", NumericOperator::Le, 50.0)
            .add_tag_refinement("sale")
    }

    fn url(state: &SearchState) -> String {
        format!("?n={}", state.raw_refinements(None).len())
    }

    fn widget(config: WidgetConfig) -> CurrentRefinements {
        CurrentRefinements::new(config).unwrap()
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = WidgetConfig::default()
            .with_attribute(AttributeSpec::new("a"))
            .with_attribute(AttributeSpec::new("a"));
        assert!(matches!(
            CurrentRefinements::new(config),
            Err(RefinedError::Config(_))
        ));
    }

    #[test]
    fn init_marks_first_rendering() {
        let w = widget(WidgetConfig::default());
        let params = w.init(&state(), &url);
        assert!(params.is_first_rendering);
        assert_eq!(params.refinements.len(), 3);

        let params = w.render(&SearchResults::new(), &state(), &url);
        assert!(!params.is_first_rendering);
    }

    #[test]
    fn params_carry_clear_states_and_urls() {
        let w = widget(WidgetConfig::default());
        let params = w.init(&state(), &url);

        assert_eq!(params.clear_all_url, "?n=0");
        assert_eq!(params.clear_refinement_urls, vec!["?n=2"; 3]);
        for (i, refinement) in params.refinements.iter().enumerate() {
            let cleared = params.clear_state(i).unwrap();
            assert!(!w.refinements(None, cleared).contains(refinement));
            assert_eq!(params.clear_url(i), Some("?n=2"));
        }
        assert!(params.clear_state(3).is_none());
        assert!(params.clear_url(3).is_none());
    }

    #[test]
    fn only_listed_scopes_refinements_and_clear_all() {
        let config = WidgetConfig::default()
            .with_attribute(AttributeSpec::new("color").with_label("Color"))
            .only_listed_attributes(true);
        let w = widget(config);
        let params = w.init(&state(), &url);

        assert_eq!(params.refinements.len(), 1);
        assert_eq!(params.attributes["color"].label.as_deref(), Some("Color"));
        // price and sale survive a scoped clear-all
        assert_eq!(params.clear_all_url, "?n=2");
    }

    #[test]
    fn also_clear_query_resets_query() {
        let w = widget(WidgetConfig::default().also_clear_query(true));
        let params = w.init(&state(), &url);
        assert_eq!(params.clear_all_state.query, "");

        let w = widget(WidgetConfig::default());
        let params = w.init(&state(), &url);
        assert_eq!(params.clear_all_state.query, "boots");
    }

    #[test]
    fn clear_updates_helper_and_searches() {
        let w = widget(WidgetConfig::default());
        let mut helper = LocalHelper::new(state());
        let first = w.refinements(None, helper.state()).remove(0);

        w.clear(&mut helper, &first);

        assert_eq!(helper.searches(), 1);
        assert!(!w.refinements(None, helper.state()).contains(&first));
    }

    #[test]
    fn clear_at_reports_missing_index() {
        let w = widget(WidgetConfig::default());
        let mut helper = LocalHelper::new(state());
        assert!(matches!(
            w.clear_at(&mut helper, 7),
            Err(RefinedError::IndexOutOfRange(7))
        ));
        assert_eq!(helper.searches(), 0);

        let removed = w.clear_at(&mut helper, 0).unwrap();
        assert_eq!(removed.name(), "red");
        assert_eq!(helper.searches(), 1);
    }

    #[test]
    fn clear_all_through_helper() {
        let w = widget(WidgetConfig::default());
        let mut helper = LocalHelper::new(state());
        w.clear_all(&mut helper);
        assert!(helper.state().is_unrefined());
        assert_eq!(helper.searches(), 1);
    }
}
