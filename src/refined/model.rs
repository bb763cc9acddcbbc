//! Core data types: refinement kinds, numeric operators and refinement records.
//!
//! A refinement is one active filter constraint on a search. The host query state
//! reports them as [`RawRefinement`]s; the extractor turns those into labeled
//! [`Refinement`]s. Keeping the two types apart means a record without a computed
//! label never leaves the extractor.

use crate::error::{RefinedError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Attribute name under which the global tag list is reported.
pub const TAGS_ATTRIBUTE: &str = "_tags";

/// Every `type` string a serialized refinement may carry.
pub const REFINEMENT_TYPES: &[&str] = &[
    "facet",
    "disjunctive",
    "hierarchical",
    "exclude",
    "numeric",
    "tag",
];

/// Comparison operator of a numeric refinement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NumericOperator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
}

impl NumericOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumericOperator::Eq => "=",
            NumericOperator::Ne => "!=",
            NumericOperator::Gt => ">",
            NumericOperator::Ge => ">=",
            NumericOperator::Lt => "<",
            NumericOperator::Le => "<=",
        }
    }
}

impl fmt::Display for NumericOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NumericOperator {
    type Err = RefinedError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "=" => Ok(NumericOperator::Eq),
            "!=" => Ok(NumericOperator::Ne),
            ">" => Ok(NumericOperator::Gt),
            ">=" => Ok(NumericOperator::Ge),
            "<" => Ok(NumericOperator::Lt),
            "<=" => Ok(NumericOperator::Le),
            other => Err(RefinedError::Config(format!(
                "Unknown numeric operator: {}",
                other
            ))),
        }
    }
}

/// The kind of a refinement, with the data only numeric refinements carry.
///
/// Serialized with an internal `type` tag so records look like
/// `{"type": "numeric", "operator": ">=", "numericValue": 10, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RefinementKind {
    /// Exact-match facet value.
    Facet,
    /// Facet value combined with its siblings using OR.
    Disjunctive,
    /// Path in a hierarchical facet (e.g. `Books > Fiction`).
    Hierarchical,
    /// Negated facet value.
    Exclude,
    /// Comparison on a numeric attribute.
    Numeric {
        operator: NumericOperator,
        #[serde(rename = "numericValue")]
        numeric_value: f64,
    },
    /// Global tag, reported under [`TAGS_ATTRIBUTE`].
    Tag,
}

impl RefinementKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            RefinementKind::Facet => "facet",
            RefinementKind::Disjunctive => "disjunctive",
            RefinementKind::Hierarchical => "hierarchical",
            RefinementKind::Exclude => "exclude",
            RefinementKind::Numeric { .. } => "numeric",
            RefinementKind::Tag => "tag",
        }
    }
}

/// A refinement as reported by the query state, before labeling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRefinement {
    #[serde(flatten)]
    pub kind: RefinementKind,
    pub attribute_name: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exhaustive: Option<bool>,
}

impl RawRefinement {
    pub fn new(kind: RefinementKind, attribute: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            attribute_name: attribute.into(),
            name: name.into(),
            count: None,
            exhaustive: None,
        }
    }

    pub fn facet(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(RefinementKind::Facet, attribute, value)
    }

    pub fn disjunctive(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(RefinementKind::Disjunctive, attribute, value)
    }

    pub fn hierarchical(attribute: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(RefinementKind::Hierarchical, attribute, path)
    }

    pub fn exclude(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(RefinementKind::Exclude, attribute, value)
    }

    /// Numeric refinements are named after their value (`10`, `2.5`).
    pub fn numeric(attribute: impl Into<String>, operator: NumericOperator, value: f64) -> Self {
        Self::new(
            RefinementKind::Numeric {
                operator,
                numeric_value: value,
            },
            attribute,
            value.to_string(),
        )
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Self::new(RefinementKind::Tag, TAGS_ATTRIBUTE, tag)
    }

    pub fn with_count(mut self, count: u64, exhaustive: bool) -> Self {
        self.count = Some(count);
        self.exhaustive = Some(exhaustive);
        self
    }

    pub fn operator(&self) -> Option<NumericOperator> {
        match self.kind {
            RefinementKind::Numeric { operator, .. } => Some(operator),
            _ => None,
        }
    }

    pub fn numeric_value(&self) -> Option<f64> {
        match self.kind {
            RefinementKind::Numeric { numeric_value, .. } => Some(numeric_value),
            _ => None,
        }
    }

    /// Parse a record that arrived as untyped JSON.
    ///
    /// The `type` field is checked before deserializing so an unknown kind is
    /// reported as [`RefinedError::UnrecognizedRefinement`] instead of a generic
    /// serde error.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("<missing>");
        if !REFINEMENT_TYPES.contains(&kind) {
            return Err(RefinedError::UnrecognizedRefinement(kind.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// A normalized, labeled refinement record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refinement {
    #[serde(flatten)]
    pub raw: RawRefinement,
    pub computed_label: String,
}

impl Refinement {
    pub fn kind(&self) -> &RefinementKind {
        &self.raw.kind
    }

    pub fn attribute_name(&self) -> &str {
        &self.raw.attribute_name
    }

    pub fn name(&self) -> &str {
        &self.raw.name
    }

    pub fn count(&self) -> Option<u64> {
        self.raw.count
    }

    pub fn operator(&self) -> Option<NumericOperator> {
        self.raw.operator()
    }
}

impl AsRef<RawRefinement> for RawRefinement {
    fn as_ref(&self) -> &RawRefinement {
        self
    }
}

impl AsRef<RawRefinement> for Refinement {
    fn as_ref(&self) -> &RawRefinement {
        &self.raw
    }
}
