use cafe_page_editor::{
    config::{EditorConfig, ScopeTable, CHROME_CLASS},
    dom::{LiveDocument, MemoryDocument},
    visual_editor::{
        scanner::{generated_id, scan},
        SemanticType,
    },
};

use crate::common::homepage_document;

mod common;

fn ids(doc: &MemoryDocument, config: &EditorConfig) -> Vec<String> {
    scan(doc, config, &ScopeTable::homepage()).into_iter().map(|d| d.id).collect()
}

// =========================================================================
// Marker mode
// =========================================================================

#[test]
fn empty_page_scans_to_nothing() {
    let doc = MemoryDocument::new();
    assert!(ids(&doc, &EditorConfig::default()).is_empty());
}

#[test]
fn marked_nodes_in_document_order_without_chrome() {
    let doc = homepage_document();
    let found = ids(&doc, &EditorConfig::default());

    assert_eq!(
        found,
        vec![
            "header-logo",
            "hero-background",
            "hero-title",
            "hero-subtitle",
            "hero-cta-button",
            "category-coffee-card",
            "category-coffee-icon",
            "about-photo",
        ]
    );
    assert!(!found.contains(&"panel-title".to_string()), "editor panel must never be editable");
}

#[test]
fn descriptor_captures_text_and_style() {
    let doc = homepage_document();
    let title = doc.find_by_attribute("data-editable", "hero-title").unwrap();
    doc.set_inline_style(&title, "color", "#ff6b35");

    let found = scan(&doc, &EditorConfig::default(), &ScopeTable::homepage());
    let descriptor = found.iter().find(|d| d.id == "hero-title").unwrap();

    assert_eq!(descriptor.tag, "h1");
    assert_eq!(descriptor.current_text, "Good coffee");
    assert_eq!(descriptor.style.color, "#ff6b35");
    assert_eq!(descriptor.style.font_size, "16px");
}

#[test]
fn unreadable_node_is_skipped_and_scan_goes_on() {
    let doc = homepage_document();
    let subtitle = doc.find_by_attribute("data-editable", "hero-subtitle").unwrap();
    doc.make_style_unreadable(subtitle);

    let found = ids(&doc, &EditorConfig::default());

    assert!(!found.contains(&"hero-subtitle".to_string()));
    assert!(found.contains(&"hero-title".to_string()));
    assert!(found.contains(&"about-photo".to_string()));
}

#[test]
fn duplicate_and_blank_markers() {
    let doc = MemoryDocument::new();
    let first = doc.append_editable(None, "h1", "hero-title", "First");
    doc.append_editable(None, "h2", "hero-title", "Second");
    doc.append_editable(None, "p", "  ", "Blank id");

    let found = scan(&doc, &EditorConfig::default(), &ScopeTable::homepage());

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].current_text, "First");
    assert_eq!(doc.find_by_attribute("data-editable", "hero-title"), Some(first));
}

#[test]
fn marked_header_is_still_editable() {
    let doc = homepage_document();
    let found = scan(&doc, &EditorConfig::default(), &ScopeTable::homepage());
    let logo = found.iter().find(|d| d.id == "header-logo").expect("logo inside <header>");
    assert_eq!(logo.semantic_type, SemanticType::Image);
}

// =========================================================================
// Heuristic mode
// =========================================================================

fn heuristic_config() -> EditorConfig {
    EditorConfig { heuristic: true, ..EditorConfig::default() }
}

#[test]
fn heuristic_mode_picks_up_unmarked_content() {
    let doc = MemoryDocument::new();
    let welcome = doc.append(None, "h1", "Welcome to Our Café");
    let menu = doc.append(None, "h1", "Menu");
    doc.append(None, "p", "   ");
    doc.append(None, "img", "");
    let header = doc.append(None, "header", "");
    doc.append(Some(header), "p", "Logo text");
    let panel = doc.append(None, "div", "");
    doc.add_class(panel, CHROME_CLASS);
    doc.append(Some(panel), "button", "Save");
    doc.append_editable(None, "p", "hero-subtitle", "Marked");

    let found = ids(&doc, &heuristic_config());

    assert_eq!(found, vec!["hero-subtitle", "h1_welcome_to_our_café_0", "h1_menu_1"]);
    assert_eq!(
        doc.attribute(&welcome, "data-editable").as_deref(),
        Some("h1_welcome_to_our_café_0"),
        "generated id is written back so later lookups find the node"
    );
    assert_eq!(doc.attribute(&menu, "data-editable").as_deref(), Some("h1_menu_1"));
}

#[test]
fn heuristic_ids_are_stable_across_rescans() {
    let doc = MemoryDocument::new();
    doc.append(None, "h2", "Opening hours");
    doc.append(None, "p", "Monday to Sunday");

    let config = heuristic_config();
    let first = ids(&doc, &config);
    let second = ids(&doc, &config);

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn generated_id_truncates_and_joins() {
    assert_eq!(generated_id("p", "  Fresh   bread daily from the oven ", 2), "p__fresh_bread_dail_2");
    assert_eq!(generated_id("h2", "Opening\n\thours", 0), "h2_opening_hours_0");
    assert_eq!(generated_id("img", "", 0), "img_element_0");
}
