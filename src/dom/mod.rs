//! The live document the editor works against.
//!
//! The editor core never holds element handles for longer than one operation:
//! every lookup goes back through [`LiveDocument::find_by_attribute`], so a node
//! re-created by a re-render is found again and a removed one is a miss.

pub mod memory;
pub mod web;

use serde::{Deserialize, Serialize};

use crate::error::DomError;

pub use memory::MemoryDocument;
pub use web::WebDocument;

/// Matches an ancestor (or the node itself) by tag name or class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AncestorMatch {
    Tag(String),
    Class(String),
}

impl AncestorMatch {
    pub fn tag(name: &str) -> Self {
        AncestorMatch::Tag(name.to_string())
    }

    pub fn class(name: &str) -> Self {
        AncestorMatch::Class(name.to_string())
    }

    pub fn to_selector(&self) -> String {
        match self {
            AncestorMatch::Tag(tag) => tag.clone(),
            AncestorMatch::Class(class) => format!(".{}", class),
        }
    }
}

pub trait LiveDocument {
    type Node: Clone;

    /// Elements carrying `attribute`, in document order.
    fn elements_with_attribute(&self, attribute: &str) -> Vec<Self::Node>;

    /// Elements whose (lowercase) tag is one of `tags`, in document order.
    fn elements_by_tag(&self, tags: &[String]) -> Vec<Self::Node>;

    fn find_by_attribute(&self, attribute: &str, value: &str) -> Option<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    /// Lowercase tag name.
    fn tag_name(&self, node: &Self::Node) -> String;

    fn text_content(&self, node: &Self::Node) -> String;

    fn set_text_content(&self, node: &Self::Node, text: &str);

    /// True if the node or one of its ancestors matches.
    fn has_ancestor(&self, node: &Self::Node, matcher: &AncestorMatch) -> bool;

    /// Inline style value, empty when unset.
    fn inline_style(&self, node: &Self::Node, property: &str) -> String;

    /// Sets an inline style; an empty value removes the property.
    fn set_inline_style(&self, node: &Self::Node, property: &str, value: &str);

    fn computed_style(&self, node: &Self::Node, property: &str) -> Result<String, DomError>;

    fn set_class(&self, node: &Self::Node, class: &str, on: bool);
}
