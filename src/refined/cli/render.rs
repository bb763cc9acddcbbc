//! # Rendering Module
//!
//! Turns extracted refinements into terminal text. Item text comes from the
//! library's [`ItemRenderer`](refined::template::ItemRenderer) templates; this module
//! only lays the items out in numbered, aligned rows and applies colors.
//!
//! Column alignment uses display width, not byte length, so labels such as `≥ 10`
//! or non-Latin attribute names line up.

use super::styles::{paint, REFINED_THEME};
use refined::model::{Refinement, RefinementKind};
use unicode_width::UnicodeWidthStr;

pub const EMPTY_MESSAGE: &str = "No active refinements.";

/// Renders numbered rows: index, attribute name, item text.
///
/// `items[i]` is the rendered text of `refinements[i]`.
pub fn render_refinement_list(
    refinements: &[Refinement],
    items: &[String],
    use_color: bool,
) -> String {
    let theme = &*REFINED_THEME;

    if refinements.is_empty() {
        return format!("{}\n", paint(&theme.empty, EMPTY_MESSAGE, use_color));
    }

    let index_width = refinements.len().to_string().len();
    let attribute_width = refinements
        .iter()
        .map(|r| r.attribute_name().width())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (i, (refinement, item)) in refinements.iter().zip(items).enumerate() {
        let index = format!("{:>width$}.", i + 1, width = index_width);
        let attribute = refinement.attribute_name();
        let padding = " ".repeat(attribute_width.saturating_sub(attribute.width()));

        let item = match refinement.kind() {
            RefinementKind::Exclude => paint(&theme.exclude, item, use_color),
            _ => item.clone(),
        };

        out.push_str(&format!(
            "  {} {}{}  {}\n",
            paint(&theme.index, &index, use_color),
            paint(&theme.attribute, attribute, use_color),
            padding,
            item
        ));
    }
    out
}

pub fn render_cleared(refinement: &Refinement, use_color: bool) -> String {
    let message = format!(
        "Cleared {} {}",
        refinement.attribute_name(),
        refinement.computed_label
    );
    paint(&REFINED_THEME.success, &message, use_color)
}

pub fn render_cleared_all(count: usize, use_color: bool) -> String {
    let message = match count {
        1 => "Cleared 1 refinement".to_string(),
        n => format!("Cleared {} refinements", n),
    };
    paint(&REFINED_THEME.success, &message, use_color)
}
