//! Global style rules and the inline style given to every page element.

use crate::config::LeafConfig;

/// Inline style written on each page element at creation.
pub const PAGE_INLINE_STYLE: &[(&str, &str)] = &[
    ("display", "flex"),
    ("flex-direction", "row"),
    ("position", "absolute"),
    ("width", "100vw"),
    ("height", "100vh"),
    ("border", "0"),
    ("padding", "0px"),
    ("margin", "0px"),
    ("float", "none"),
];

const HIDDEN_DECLARATIONS: &[(&str, &str)] = &[
    ("display", "none"),
    ("width", "0px"),
    ("height", "0px"),
    ("opacity", "0"),
];

const PAGE_DECLARATIONS: &[(&str, &str)] = &[
    ("display", "flex"),
    ("position", "absolute"),
    ("border", "0"),
    ("padding", "0px"),
    ("margin", "0px"),
    ("float", "none"),
];

/// Renders `property: value;` pairs separated by spaces.
pub fn declarations(pairs: &[(&str, &str)], important: bool) -> String {
    let suffix = if important { " !important" } else { "" };
    pairs
        .iter()
        .map(|(property, value)| format!("{property}: {value}{suffix};"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn rule(selector: &str, pairs: &[(&str, &str)]) -> String {
    format!("{selector} {{ {} }}", declarations(pairs, true))
}

/// Rules inserted at boot, in insertion order. Each one goes in at index 0,
/// so the sheet ends up holding them reversed.
pub fn global_rules(config: &LeafConfig) -> [String; 2] {
    [
        rule(&format!(".{}", config.hidden_class), HIDDEN_DECLARATIONS),
        rule(
            &format!("{}.{}", config.page_tag, config.page_class),
            PAGE_DECLARATIONS,
        ),
    ]
}

pub fn page_inline_style() -> String {
    declarations(PAGE_INLINE_STYLE, false)
}
