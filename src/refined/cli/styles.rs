use console::Style;
use once_cell::sync::Lazy;

pub struct Theme {
    pub index: Style,
    pub attribute: Style,
    pub exclude: Style,
    pub empty: Style,
    pub success: Style,
}

pub static REFINED_THEME: Lazy<Theme> = Lazy::new(|| Theme {
    index: Style::new().yellow(),
    attribute: Style::new().cyan().bold(),
    exclude: Style::new().red(),
    empty: Style::new().dim(),
    success: Style::new().green(),
});

/// Apply `style` to `text`, or return it unchanged when color is off.
pub fn paint(style: &Style, text: &str, use_color: bool) -> String {
    style
        .clone()
        .force_styling(use_color)
        .apply_to(text)
        .to_string()
}
