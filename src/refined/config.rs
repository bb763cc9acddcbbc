use crate::error::{RefinedError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Caller hook applied to an item's template data before rendering.
pub type TransformData = Arc<dyn Fn(serde_json::Value) -> serde_json::Value + Send + Sync>;

/// A declared attribute: its display label and optional item template.
#[derive(Clone, Serialize, Deserialize)]
pub struct AttributeSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// minijinja template for this attribute's items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    #[serde(skip)]
    pub transform_data: Option<TransformData>,
}

impl AttributeSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            template: None,
            transform_data: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(serde_json::Value) -> serde_json::Value + Send + Sync + 'static,
    {
        self.transform_data = Some(Arc::new(transform));
        self
    }
}

impl fmt::Debug for AttributeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeSpec")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("template", &self.template)
            .field("transform_data", &self.transform_data.is_some())
            .finish()
    }
}

/// Widget configuration, usually loaded from a JSON file:
///
/// ```json
/// {
///   "attributes": [{"name": "brand", "label": "Brand"}, {"name": "price"}],
///   "onlyListedAttributes": true,
///   "alsoClearQuery": false
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    #[serde(default)]
    pub attributes: Vec<AttributeSpec>,

    /// Hide refinements on attributes not declared in `attributes`
    #[serde(default)]
    pub only_listed_attributes: bool,

    /// Clear-all also resets the free-text query
    #[serde(default)]
    pub also_clear_query: bool,
}

impl WidgetConfig {
    /// Load config from a JSON file, or return defaults if it does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(RefinedError::Io)?;
        let config: WidgetConfig =
            serde_json::from_str(&content).map_err(RefinedError::Serialization)?;
        Ok(config)
    }

    pub fn with_attribute(mut self, attribute: AttributeSpec) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn only_listed_attributes(mut self, value: bool) -> Self {
        self.only_listed_attributes = value;
        self
    }

    pub fn also_clear_query(mut self, value: bool) -> Self {
        self.also_clear_query = value;
        self
    }

    /// Declared attribute names, in declaration order.
    pub fn attribute_names(&self) -> Vec<String> {
        self.attributes.iter().map(|a| a.name.clone()).collect()
    }

    /// Declared attributes keyed by name.
    pub fn label_map(&self) -> BTreeMap<String, AttributeSpec> {
        self.attributes
            .iter()
            .map(|a| (a.name.clone(), a.clone()))
            .collect()
    }

    /// Refuse blank or duplicate attribute names and templates that do not parse.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for attribute in &self.attributes {
            if attribute.name.trim().is_empty() {
                return Err(RefinedError::Config(
                    "attribute name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(attribute.name.as_str()) {
                return Err(RefinedError::Config(format!(
                    "attribute '{}' is declared more than once",
                    attribute.name
                )));
            }
            if let Some(source) = &attribute.template {
                let env = minijinja::Environment::new();
                env.template_from_str(source)?;
            }
        }
        Ok(())
    }
}
