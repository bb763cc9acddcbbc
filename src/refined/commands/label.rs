use crate::model::{NumericOperator, RawRefinement, Refinement};

/// Symbol shown for an operator. Only `>=` and `<=` get a substitute.
pub fn display_operator(operator: NumericOperator) -> &'static str {
    match operator {
        NumericOperator::Ge => "≥",
        NumericOperator::Le => "≤",
        other => other.as_str(),
    }
}

/// Label for a refinement named `name`, optionally compared with `operator`.
pub fn compute_label(name: &str, operator: Option<NumericOperator>) -> String {
    match operator {
        Some(op) => format!("{} {}", display_operator(op), name),
        None => name.to_string(),
    }
}

pub fn label(raw: RawRefinement) -> Refinement {
    let computed_label = compute_label(&raw.name, raw.operator());
    Refinement { raw, computed_label }
}
