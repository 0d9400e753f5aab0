#![allow(dead_code)]

use cafe_page_editor::{
    config::{EditorConfig, CHROME_CLASS},
    dom::{LiveDocument, MemoryDocument},
    visual_editor::PageEditor,
};

/// A cut-down homepage: header logo, hero block, one category card, an
/// about photo and the editor's own panel.
pub fn homepage_document() -> MemoryDocument {
    let doc = MemoryDocument::new();

    let header = doc.append(None, "header", "");
    let logo = doc.append_editable(Some(header), "img", "header-logo", "");
    doc.set_attribute(&logo, "src", "/assets/logo.png");

    let hero = doc.append_editable(None, "section", "hero-background", "");
    doc.append_editable(Some(hero), "h1", "hero-title", "Good coffee");
    doc.append_editable(Some(hero), "p", "hero-subtitle", "Slow mornings");
    doc.append_editable(Some(hero), "a", "hero-cta-button", "See the menu");

    let card = doc.append_editable(None, "div", "category-coffee-card", "");
    doc.append_editable(Some(card), "span", "category-coffee-icon", "☕");

    let photo = doc.append_editable(None, "img", "about-photo", "");
    doc.set_attribute(&photo, "src", "/assets/interior.jpg");

    let panel = doc.append(None, "div", "");
    doc.add_class(panel, CHROME_CLASS);
    doc.append_editable(Some(panel), "h3", "panel-title", "Editing");

    doc
}

pub fn editor_for(doc: MemoryDocument, scope: &str) -> PageEditor<MemoryDocument> {
    let mut editor = PageEditor::new(doc, EditorConfig::for_scope(scope)).expect("built-in scope");
    editor.scan();
    editor
}

pub fn homepage_editor() -> PageEditor<MemoryDocument> {
    editor_for(homepage_document(), "homepage")
}

pub fn node(editor: &PageEditor<MemoryDocument>, id: &str) -> usize {
    editor
        .document()
        .find_by_attribute("data-editable", id)
        .unwrap_or_else(|| panic!("{} is not on the page", id))
}
