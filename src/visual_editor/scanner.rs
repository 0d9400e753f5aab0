use std::collections::{BTreeMap, HashSet};

use tracing::{debug, warn};

use super::element::{ElementDescriptor, StyleSnapshot};
use crate::config::{EditorConfig, ScopeTable};
use crate::dom::LiveDocument;
use crate::error::DomError;

/// Walks the live document and describes every editable node, marked nodes
/// first, then (in heuristic mode) unmarked text, interactive and image tags.
/// Never fails: unreadable nodes are skipped.
pub fn scan<D: LiveDocument>(doc: &D, config: &EditorConfig, table: &ScopeTable) -> Vec<ElementDescriptor> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for node in doc.elements_with_attribute(&config.marker_attribute) {
        if in_chrome(doc, &node, config) {
            continue;
        }
        let id = doc.attribute(&node, &config.marker_attribute).unwrap_or_default();
        if id.trim().is_empty() {
            continue;
        }
        if !seen.insert(id.clone()) {
            debug!("Duplicate marker {}, keeping first", id);
            continue;
        }
        if let Some(descriptor) = describe(doc, &node, id, table) {
            found.push(descriptor);
        }
    }

    if config.heuristic {
        let mut per_tag: BTreeMap<String, usize> = BTreeMap::new();
        for node in doc.elements_by_tag(&config.heuristic_tags) {
            let tag = doc.tag_name(&node);
            let index = {
                let counter = per_tag.entry(tag.clone()).or_default();
                *counter += 1;
                *counter - 1
            };
            if doc.attribute(&node, &config.marker_attribute).is_some()
                || in_chrome(doc, &node, config)
                || config.heuristic_exclude.iter().any(|m| doc.has_ancestor(&node, m))
                || !has_content(doc, &node, &tag)
            {
                continue;
            }
            let id = generated_id(&tag, &doc.text_content(&node), index);
            if !seen.insert(id.clone()) {
                continue;
            }
            doc.set_attribute(&node, &config.marker_attribute, &id);
            if let Some(descriptor) = describe(doc, &node, id, table) {
                found.push(descriptor);
            }
        }
    }

    debug!("Scanned {} editable elements", found.len());
    found
}

fn in_chrome<D: LiveDocument>(doc: &D, node: &D::Node, config: &EditorConfig) -> bool {
    config.chrome.iter().any(|matcher| doc.has_ancestor(node, matcher))
}

fn has_content<D: LiveDocument>(doc: &D, node: &D::Node, tag: &str) -> bool {
    if tag == "img" {
        return doc.attribute(node, "src").is_some_and(|src| !src.trim().is_empty());
    }
    !doc.text_content(node).trim().is_empty()
}

/// `<tag>_<first 20 chars of text, each whitespace run as '_', lowercased>_<index>`.
///
/// The raw text is sliced before whitespace is replaced, so leading blanks
/// show up as a leading `_`. Text without any characters uses `element`.
pub fn generated_id(tag: &str, text: &str, index: usize) -> String {
    let snippet: String = text.chars().take(20).collect();
    let mut joined = String::with_capacity(snippet.len());
    let mut in_blank = false;
    for c in snippet.chars() {
        if c.is_whitespace() {
            if !in_blank {
                joined.push('_');
            }
            in_blank = true;
        } else {
            joined.push(c);
            in_blank = false;
        }
    }
    let snippet = if joined.is_empty() { "element".to_string() } else { joined.to_lowercase() };
    format!("{}_{}_{}", tag, snippet, index)
}

fn describe<D: LiveDocument>(
    doc: &D,
    node: &D::Node,
    id: String,
    table: &ScopeTable,
) -> Option<ElementDescriptor> {
    let tag = doc.tag_name(node);
    let style = match read_style(doc, node) {
        Ok(style) => style,
        Err(err) => {
            warn!("Skipping {}: {}", id, err);
            return None;
        }
    };
    let semantic_type = table.classify(&id, &tag);
    Some(ElementDescriptor {
        allowed_tools: table.allowed_tools(semantic_type),
        current_text: doc.text_content(node),
        semantic_type,
        style,
        tag,
        id,
    })
}

fn read_style<D: LiveDocument>(doc: &D, node: &D::Node) -> Result<StyleSnapshot, DomError> {
    Ok(StyleSnapshot {
        color: doc.computed_style(node, "color")?,
        background_color: doc.computed_style(node, "background-color")?,
        font_size: doc.computed_style(node, "font-size")?,
    })
}
