//! In-process document used off the browser: by the test-suite and for
//! headless previews of a page's editable surface.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use super::{AncestorMatch, LiveDocument};
use crate::error::DomError;

pub type NodeId = usize;

#[derive(Clone, Debug, Default)]
struct MemoryElement {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    text: String,
    style: BTreeMap<String, String>,
    parent: Option<NodeId>,
    detached: bool,
    style_unreadable: bool,
}

#[derive(Debug, Default)]
pub struct MemoryDocument {
    nodes: RefCell<Vec<MemoryElement>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element under `parent` (or at the root) and returns it.
    pub fn append(&self, parent: Option<NodeId>, tag: &str, text: &str) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(MemoryElement {
            tag: tag.to_ascii_lowercase(),
            text: text.to_string(),
            parent,
            ..Default::default()
        });
        nodes.len() - 1
    }

    /// Appends an element carrying `data-editable="<id>"`.
    pub fn append_editable(&self, parent: Option<NodeId>, tag: &str, id: &str, text: &str) -> NodeId {
        let node = self.append(parent, tag, text);
        self.set_attribute(&node, "data-editable", id);
        node
    }

    /// Removes the node (and so its subtree) from the document.
    pub fn detach(&self, node: NodeId) {
        if let Some(element) = self.nodes.borrow_mut().get_mut(node) {
            element.detached = true;
        }
    }

    pub fn make_style_unreadable(&self, node: NodeId) {
        if let Some(element) = self.nodes.borrow_mut().get_mut(node) {
            element.style_unreadable = true;
        }
    }

    pub fn add_class(&self, node: NodeId, class: &str) {
        self.set_class(&node, class, true);
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes
            .borrow()
            .get(node)
            .is_some_and(|element| element.classes.contains(class))
    }

    /// Inline style of the attached node carrying `data-editable="<id>"`.
    pub fn style_of(&self, id: &str, property: &str) -> Option<String> {
        let node = self.find_by_attribute("data-editable", id)?;
        Some(self.inline_style(&node, property))
    }

    /// Text of the attached node carrying `data-editable="<id>"`.
    pub fn text_of(&self, id: &str) -> Option<String> {
        let node = self.find_by_attribute("data-editable", id)?;
        Some(self.text_content(&node))
    }

    fn is_attached(&self, node: NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = Some(node);
        while let Some(index) = current {
            let Some(element) = nodes.get(index) else {
                return false;
            };
            if element.detached {
                return false;
            }
            current = element.parent;
        }
        true
    }

    fn attached_where(&self, predicate: impl Fn(&MemoryElement) -> bool) -> Vec<NodeId> {
        let candidates: Vec<NodeId> = self
            .nodes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, element)| predicate(element))
            .map(|(index, _)| index)
            .collect();
        candidates.into_iter().filter(|&node| self.is_attached(node)).collect()
    }
}

impl LiveDocument for MemoryDocument {
    type Node = NodeId;

    fn elements_with_attribute(&self, attribute: &str) -> Vec<NodeId> {
        self.attached_where(|element| element.attributes.contains_key(attribute))
    }

    fn elements_by_tag(&self, tags: &[String]) -> Vec<NodeId> {
        self.attached_where(|element| tags.iter().any(|tag| *tag == element.tag))
    }

    fn find_by_attribute(&self, attribute: &str, value: &str) -> Option<NodeId> {
        self.attached_where(|element| element.attributes.get(attribute).is_some_and(|v| v == value))
            .into_iter()
            .next()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow().get(*node)?.attributes.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        if let Some(element) = self.nodes.borrow_mut().get_mut(*node) {
            element.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.nodes.borrow().get(*node).map(|element| element.tag.clone()).unwrap_or_default()
    }

    fn text_content(&self, node: &NodeId) -> String {
        self.nodes.borrow().get(*node).map(|element| element.text.clone()).unwrap_or_default()
    }

    fn set_text_content(&self, node: &NodeId, text: &str) {
        if let Some(element) = self.nodes.borrow_mut().get_mut(*node) {
            element.text = text.to_string();
        }
    }

    fn has_ancestor(&self, node: &NodeId, matcher: &AncestorMatch) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = Some(*node);
        while let Some(index) = current {
            let Some(element) = nodes.get(index) else {
                return false;
            };
            let hit = match matcher {
                AncestorMatch::Tag(tag) => element.tag == *tag,
                AncestorMatch::Class(class) => element.classes.contains(class),
            };
            if hit {
                return true;
            }
            current = element.parent;
        }
        false
    }

    fn inline_style(&self, node: &NodeId, property: &str) -> String {
        self.nodes
            .borrow()
            .get(*node)
            .and_then(|element| element.style.get(property).cloned())
            .unwrap_or_default()
    }

    fn set_inline_style(&self, node: &NodeId, property: &str, value: &str) {
        if let Some(element) = self.nodes.borrow_mut().get_mut(*node) {
            if value.is_empty() {
                element.style.remove(property);
            } else {
                element.style.insert(property.to_string(), value.to_string());
            }
        }
    }

    fn computed_style(&self, node: &NodeId, property: &str) -> Result<String, DomError> {
        let nodes = self.nodes.borrow();
        let element = nodes.get(*node).ok_or(DomError::NoDocument)?;
        if element.style_unreadable {
            return Err(DomError::StyleUnavailable { tag: element.tag.clone() });
        }
        if let Some(value) = element.style.get(property) {
            return Ok(value.clone());
        }
        Ok(match property {
            "color" => "rgb(0, 0, 0)",
            "background-color" => "rgba(0, 0, 0, 0)",
            "font-size" => "16px",
            _ => "",
        }
        .to_string())
    }

    fn set_class(&self, node: &NodeId, class: &str, on: bool) {
        if let Some(element) = self.nodes.borrow_mut().get_mut(*node) {
            if on {
                element.classes.insert(class.to_string());
            } else {
                element.classes.remove(class);
            }
        }
    }
}
