//! Reading the paint a shape declares for itself.

/// The shape's own stroke, read from the `stroke` presentation attribute.
///
/// Inline `style` and stylesheet rules are not consulted.
pub fn own_stroke(node: roxmltree::Node<'_, '_>) -> Option<String> {
    node.attribute("stroke")
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Whether a paint value can be written into a stylesheet unchanged.
pub fn is_css_safe(value: &str) -> bool {
    !value.is_empty()
        && !value.contains("/*")
        && !value
            .chars()
            .any(|c| matches!(c, ';' | '{' | '}' | '<' | '>' | '"' | '\\') || c.is_control())
}
