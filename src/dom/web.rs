use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, NodeList, Window};

use super::{AncestorMatch, LiveDocument};
use crate::error::DomError;

/// The browser's document, reached through `web_sys`.
#[derive(Clone, Debug)]
pub struct WebDocument {
    window: Window,
    document: Document,
}

impl WebDocument {
    pub fn from_window() -> Result<Self, DomError> {
        let window = web_sys::window().ok_or(DomError::NoDocument)?;
        let document = window.document().ok_or(DomError::NoDocument)?;
        Ok(Self { window, document })
    }

    fn select_all(&self, selector: &str) -> Vec<HtmlElement> {
        match self.document.query_selector_all(selector) {
            Ok(list) => html_elements(&list),
            Err(_) => {
                tracing::warn!("Invalid selector {}", selector);
                Vec::new()
            }
        }
    }
}

fn html_elements(list: &NodeList) -> Vec<HtmlElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn escape_attribute_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

impl LiveDocument for WebDocument {
    type Node = HtmlElement;

    fn elements_with_attribute(&self, attribute: &str) -> Vec<HtmlElement> {
        self.select_all(&format!("[{}]", attribute))
    }

    fn elements_by_tag(&self, tags: &[String]) -> Vec<HtmlElement> {
        if tags.is_empty() {
            return Vec::new();
        }
        self.select_all(&tags.join(", "))
    }

    fn find_by_attribute(&self, attribute: &str, value: &str) -> Option<HtmlElement> {
        let selector = format!("[{}=\"{}\"]", attribute, escape_attribute_value(value));
        self.document
            .query_selector(&selector)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    }

    fn attribute(&self, node: &HtmlElement, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &HtmlElement, name: &str, value: &str) {
        if node.set_attribute(name, value).is_err() {
            tracing::warn!("Could not set {} on <{}>", name, self.tag_name(node));
        }
    }

    fn tag_name(&self, node: &HtmlElement) -> String {
        node.tag_name().to_ascii_lowercase()
    }

    fn text_content(&self, node: &HtmlElement) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text_content(&self, node: &HtmlElement, text: &str) {
        node.set_text_content(Some(text));
    }

    fn has_ancestor(&self, node: &HtmlElement, matcher: &AncestorMatch) -> bool {
        matches!(node.closest(&matcher.to_selector()), Ok(Some(_)))
    }

    fn inline_style(&self, node: &HtmlElement, property: &str) -> String {
        node.style().get_property_value(property).unwrap_or_default()
    }

    fn set_inline_style(&self, node: &HtmlElement, property: &str, value: &str) {
        let style = node.style();
        let result = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
        if result.is_err() {
            tracing::warn!("Could not set style {} on <{}>", property, self.tag_name(node));
        }
    }

    fn computed_style(&self, node: &HtmlElement, property: &str) -> Result<String, DomError> {
        let unavailable = || DomError::StyleUnavailable { tag: self.tag_name(node) };
        let declaration = self
            .window
            .get_computed_style(node)
            .map_err(|_| unavailable())?
            .ok_or_else(unavailable)?;
        declaration.get_property_value(property).map_err(|_| unavailable())
    }

    fn set_class(&self, node: &HtmlElement, class: &str, on: bool) {
        let _ = node.class_list().toggle_with_force(class, on);
    }
}
