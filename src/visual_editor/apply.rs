//! The one place edited values reach the live document.
//!
//! `read_live` and `apply_value` are inverses: writing back what was read
//! restores the node, which is what discard relies on.

use super::element::EditProperty;
use crate::dom::LiveDocument;

fn style_name(property: EditProperty) -> Option<&'static str> {
    match property {
        EditProperty::FontSize => Some("font-size"),
        EditProperty::Color => Some("color"),
        EditProperty::BackgroundColor => Some("background-color"),
        EditProperty::Background => Some("background"),
        EditProperty::Text | EditProperty::Image | EditProperty::Icon => None,
    }
}

fn is_img<D: LiveDocument>(doc: &D, node: &D::Node) -> bool {
    doc.tag_name(node) == "img"
}

fn unwrap_css_url(value: &str) -> String {
    let value = value.trim();
    match value.strip_prefix("url(").and_then(|v| v.strip_suffix(')')) {
        Some(inner) => inner.trim().trim_matches(|c| c == '"' || c == '\'').to_string(),
        None => value.to_string(),
    }
}

/// Current value of `property` on the node, in the same form the tools store.
pub fn read_live<D: LiveDocument>(doc: &D, node: &D::Node, property: EditProperty) -> String {
    match property {
        EditProperty::Text | EditProperty::Icon => doc.text_content(node),
        EditProperty::Image if is_img(doc, node) => doc.attribute(node, "src").unwrap_or_default(),
        EditProperty::Image => unwrap_css_url(&doc.inline_style(node, "background-image")),
        EditProperty::FontSize => {
            let raw = doc.inline_style(node, "font-size");
            raw.strip_suffix("px").map(str::to_string).unwrap_or(raw)
        }
        other => style_name(other)
            .map(|name| doc.inline_style(node, name))
            .unwrap_or_default(),
    }
}

pub fn apply_value<D: LiveDocument>(doc: &D, node: &D::Node, property: EditProperty, value: &str) {
    match property {
        EditProperty::Text | EditProperty::Icon => doc.set_text_content(node, value),
        EditProperty::Image if is_img(doc, node) => doc.set_attribute(node, "src", value),
        EditProperty::Image => {
            let css = if value.is_empty() { String::new() } else { format!("url(\"{}\")", value) };
            doc.set_inline_style(node, "background-image", &css);
        }
        EditProperty::FontSize => {
            let css = if !value.is_empty() && value.parse::<f64>().is_ok() {
                format!("{}px", value)
            } else {
                value.to_string()
            };
            doc.set_inline_style(node, "font-size", &css);
        }
        other => {
            if let Some(name) = style_name(other) {
                doc.set_inline_style(node, name, value);
            }
        }
    }
}
