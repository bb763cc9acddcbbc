//! # Item Templates
//!
//! Renders one line of text per refinement using [minijinja](https://docs.rs/minijinja).
//! An attribute that declares a `template` gets its own; every other refinement uses
//! [`DEFAULT_ITEM_TEMPLATE`].
//!
//! ## Template Data
//!
//! The context is the serialized [`Refinement`] (`type`, `attributeName`, `name`,
//! `computedLabel`, plus `operator`, `numericValue`, `count` and `exhaustive` when
//! present) extended with:
//!
//! - `label`: the attribute's declared label, when it has one
//! - `displayOperator`: the operator symbol (`≥`, `≤`, ...), numeric refinements only
//! - `exclude`: `true` for exclude refinements
//!
//! Optional keys are omitted rather than set to null, so templates test them with
//! `is defined`. The attribute's `transform_data` hook, if any, runs on this context
//! before rendering.

use crate::commands::display_operator;
use crate::config::{TransformData, WidgetConfig};
use crate::error::Result;
use crate::model::{Refinement, RefinementKind};
use minijinja::Environment;
use serde_json::{json, Value};
use std::collections::HashMap;

pub const DEFAULT_ITEM_TEMPLATE: &str = "{% if label is defined %}{{ label }}{% if operator is not defined %}:{% endif %} {% endif %}\
{% if operator is defined %}{{ displayOperator }} {% endif %}\
{% if exclude is defined %}-{% endif %}{{ name }}\
{% if count is defined %} ({{ count }}){% endif %}";

const DEFAULT_TEMPLATE_NAME: &str = "item";

pub struct ItemRenderer {
    env: Environment<'static>,
    templated: HashMap<String, String>,
    labels: HashMap<String, String>,
    transforms: HashMap<String, TransformData>,
}

impl ItemRenderer {
    /// Register the default template and every attribute template.
    pub fn new(config: &WidgetConfig) -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(DEFAULT_TEMPLATE_NAME, DEFAULT_ITEM_TEMPLATE)?;

        let mut templated = HashMap::new();
        let mut labels = HashMap::new();
        let mut transforms = HashMap::new();

        for attribute in &config.attributes {
            if let Some(source) = &attribute.template {
                let name = format!("attribute:{}", attribute.name);
                env.add_template_owned(name.clone(), source.clone())?;
                templated.insert(attribute.name.clone(), name);
            }
            if let Some(label) = &attribute.label {
                labels.insert(attribute.name.clone(), label.clone());
            }
            if let Some(transform) = &attribute.transform_data {
                transforms.insert(attribute.name.clone(), transform.clone());
            }
        }

        Ok(Self {
            env,
            templated,
            labels,
            transforms,
        })
    }

    /// Template context for one refinement, after the attribute's transform.
    pub fn item_data(&self, refinement: &Refinement) -> Result<Value> {
        let mut data = serde_json::to_value(refinement)?;
        if let Value::Object(map) = &mut data {
            if let Some(label) = self.labels.get(refinement.attribute_name()) {
                map.insert("label".into(), json!(label));
            }
            if let Some(operator) = refinement.operator() {
                map.insert("displayOperator".into(), json!(display_operator(operator)));
            }
            if matches!(refinement.kind(), RefinementKind::Exclude) {
                map.insert("exclude".into(), json!(true));
            }
        }

        Ok(match self.transforms.get(refinement.attribute_name()) {
            Some(transform) => transform(data),
            None => data,
        })
    }

    pub fn render(&self, refinement: &Refinement) -> Result<String> {
        let name = self
            .templated
            .get(refinement.attribute_name())
            .map(String::as_str)
            .unwrap_or(DEFAULT_TEMPLATE_NAME);
        let data = self.item_data(refinement)?;
        let template = self.env.get_template(name)?;
        Ok(template.render(&data)?)
    }

    pub fn render_all(&self, refinements: &[Refinement]) -> Result<Vec<String>> {
        refinements.iter().map(|r| self.render(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::label::label;
    use crate::config::AttributeSpec;
    use crate::model::{NumericOperator, RawRefinement};

    fn render_with(config: &WidgetConfig, raw: RawRefinement) -> String {
        ItemRenderer::new(config).unwrap().render(&label(raw)).unwrap()
    }

    #[test]
    fn default_template_bare_name() {
        let out = render_with(&WidgetConfig::default(), RawRefinement::facet("color", "red"));
        assert_eq!(out, "red");
    }

    #[test]
    fn default_template_with_label_and_count() {
        let config =
            WidgetConfig::default().with_attribute(AttributeSpec::new("color").with_label("Color"));
        let out = render_with(
            &config,
            RawRefinement::facet("color", "red").with_count(12, true),
        );
        assert_eq!(out, "Color: red (12)");
    }

    #[test]
    fn default_template_numeric_with_label() {
        let config =
            WidgetConfig::default().with_attribute(AttributeSpec::new("price").with_label("Price"));
        let out = render_with(
            &config,
            RawRefinement::numeric("price", NumericOperator::Ge, 10.0),
        );
        assert_eq!(out, "Price ≥ 10");
    }

    #[test]
    fn default_template_exclude_prefix() {
        let out = render_with(&WidgetConfig::default(), RawRefinement::exclude("size", "XL"));
        assert_eq!(out, "-XL");
    }

    #[test]
    fn attribute_template_overrides_default() {
        let config = WidgetConfig::default().with_attribute(
            AttributeSpec::new("brand").with_template("[{{ attributeName }}] {{ computedLabel }}"),
        );
        let renderer = ItemRenderer::new(&config).unwrap();
        let brand = renderer
            .render(&label(RawRefinement::disjunctive("brand", "Acme")))
            .unwrap();
        assert_eq!(brand, "[brand] Acme");

        let color = renderer
            .render(&label(RawRefinement::facet("color", "red")))
            .unwrap();
        assert_eq!(color, "red");
    }

    #[test]
    fn transform_runs_before_rendering() {
        let config = WidgetConfig::default().with_attribute(
            AttributeSpec::new("brand").with_transform(|mut data| {
                data["name"] = json!("ACME");
                data
            }),
        );
        let out = render_with(&config, RawRefinement::facet("brand", "Acme"));
        assert_eq!(out, "ACME");
    }

    #[test]
    fn item_data_omits_absent_fields() {
        let renderer = ItemRenderer::new(&WidgetConfig::default()).unwrap();
        let data = renderer
            .item_data(&label(RawRefinement::tag("sale")))
            .unwrap();
        assert_eq!(data["type"], "tag");
        assert_eq!(data["computedLabel"], "sale");
        assert!(data.get("label").is_none());
        assert!(data.get("count").is_none());
        assert!(data.get("operator").is_none());
    }
}
