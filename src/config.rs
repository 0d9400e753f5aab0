//! Editor configuration: which nodes are editable, how they are classified and
//! which tools each class of element gets, per page scope.
//!
//! The homepage, menu and universal editors differ only in their
//! [`ScopeTable`]; everything else is the same generic core.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::dom::AncestorMatch;
use crate::error::ConfigError;
use crate::visual_editor::element::{SemanticType, Tool, ToolSet};

pub const DEFAULT_MARKER: &str = "data-editable";
pub const DEFAULT_CATEGORY: &str = "page_editor";
/// Class carried by every piece of editor UI so the scanner skips it.
pub const CHROME_CLASS: &str = "visual-editor-chrome";

/// Classifies an element id. Matches when any `any_of` pattern and every
/// `all_of` pattern occurs in the id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeRule {
    #[serde(default)]
    pub any_of: Vec<String>,
    #[serde(default)]
    pub all_of: Vec<String>,
    pub semantic_type: SemanticType,
}

impl TypeRule {
    pub fn any(patterns: &[&str], semantic_type: SemanticType) -> Self {
        Self {
            any_of: patterns.iter().map(|p| p.to_string()).collect(),
            all_of: Vec::new(),
            semantic_type,
        }
    }

    pub fn all(patterns: &[&str], semantic_type: SemanticType) -> Self {
        Self {
            any_of: Vec::new(),
            all_of: patterns.iter().map(|p| p.to_string()).collect(),
            semantic_type,
        }
    }

    pub fn matches(&self, id: &str) -> bool {
        (self.any_of.is_empty() || self.any_of.iter().any(|p| id.contains(p.as_str())))
            && self.all_of.iter().all(|p| id.contains(p.as_str()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScopeTable {
    /// First match wins; falls back to the tag name.
    pub rules: Vec<TypeRule>,
    pub tools: BTreeMap<SemanticType, ToolSet>,
}

impl ScopeTable {
    pub fn classify(&self, id: &str, tag: &str) -> SemanticType {
        let id = id.to_ascii_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&id))
            .map(|rule| rule.semantic_type)
            .unwrap_or_else(|| SemanticType::from_tag(tag))
    }

    pub fn allowed_tools(&self, semantic_type: SemanticType) -> ToolSet {
        self.tools.get(&semantic_type).cloned().unwrap_or_default()
    }

    pub fn homepage() -> Self {
        use SemanticType::*;
        use Tool::*;
        Self {
            rules: common_rules(),
            tools: BTreeMap::from([
                (Heading, ToolSet::of(&[Tool::Text, Color])),
                (SemanticType::Text, ToolSet::of(&[Tool::Text, Color])),
                (Button, ToolSet::of(&[Tool::Text, Color])),
                (Badge, ToolSet::of(&[Tool::Text, Color])),
                (SemanticType::Image, ToolSet::of(&[Tool::Image])),
                (Icon, ToolSet::of(&[Tool::Image])),
                (Container, ToolSet::of(&[Color])),
                (Unknown, ToolSet::of(&[Tool::Text, Color])),
            ]),
        }
    }

    pub fn menu() -> Self {
        use SemanticType::*;
        use Tool::*;
        Self {
            rules: vec![
                TypeRule::any(&["icon", "emoji"], Icon),
                TypeRule::any(&["image", "photo"], SemanticType::Image),
                TypeRule::any(&["browse-menu", "button"], Button),
                TypeRule::any(&["subtitle", "description", "price"], SemanticType::Text),
                TypeRule::all(&["section", "title"], Heading),
                TypeRule::any(&["title", "category-name", "heading"], Heading),
                TypeRule::any(&["section", "card", "container"], Container),
            ],
            tools: BTreeMap::from([
                (Heading, ToolSet::of(&[Tool::Text, Color])),
                (SemanticType::Text, ToolSet::of(&[Tool::Text, Color])),
                (Button, ToolSet::of(&[Tool::Text, Color, Gradient])),
                (Badge, ToolSet::of(&[Tool::Text, Color])),
                (SemanticType::Image, ToolSet::of(&[Tool::Image])),
                (Icon, ToolSet::of(&[Tool::Image])),
                (Container, ToolSet::of(&[Color, Gradient])),
                (Unknown, ToolSet::of(&[Tool::Text, Color])),
            ]),
        }
    }

    pub fn universal() -> Self {
        use SemanticType::*;
        use Tool::*;
        Self {
            rules: common_rules(),
            tools: BTreeMap::from([
                (Heading, ToolSet::of(&[Tool::Text, Color, Gradient])),
                (SemanticType::Text, ToolSet::of(&[Tool::Text, Color])),
                (Button, ToolSet::of(&[Tool::Text, Color, Gradient])),
                (Badge, ToolSet::of(&[Tool::Text, Color, Gradient])),
                (SemanticType::Image, ToolSet::of(&[Tool::Image])),
                (Icon, ToolSet::of(&[Tool::Image])),
                (Container, ToolSet::of(&[Color, Gradient])),
                (Unknown, ToolSet::of(&[Tool::Text, Color])),
            ]),
        }
    }
}

fn common_rules() -> Vec<TypeRule> {
    use SemanticType::*;
    vec![
        TypeRule::any(&["icon", "emoji"], Icon),
        TypeRule::any(&["image", "logo", "photo"], Image),
        TypeRule::any(&["badge", "now-open", "service-options"], Badge),
        TypeRule::any(&["button", "btn", "cta-link"], Button),
        TypeRule::any(&["container", "card", "background"], Container),
        // before headings: "subtitle" contains "title"
        TypeRule::any(&["subtitle", "subheading", "description", "feature-text", "hint", "text"], Text),
        TypeRule::any(&["heading", "title"], Heading),
    ]
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub marker_attribute: String,
    /// Also pick up unmarked headings, paragraphs, buttons and images.
    pub heuristic: bool,
    pub heuristic_tags: Vec<String>,
    /// Unmarked nodes inside any of these are left alone in heuristic mode.
    pub heuristic_exclude: Vec<AncestorMatch>,
    /// Nodes inside any of these are never editable.
    pub chrome: Vec<AncestorMatch>,
    pub category: String,
    pub page_scope: String,
    pub created_by: Option<String>,
    pub scopes: BTreeMap<String, ScopeTable>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            marker_attribute: DEFAULT_MARKER.to_string(),
            heuristic: false,
            heuristic_tags: ["h1", "h2", "h3", "h4", "h5", "h6", "p", "button", "a", "img"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            heuristic_exclude: vec![AncestorMatch::tag("header"), AncestorMatch::tag("footer")],
            chrome: vec![AncestorMatch::class(CHROME_CLASS)],
            category: DEFAULT_CATEGORY.to_string(),
            page_scope: "homepage".to_string(),
            created_by: None,
            scopes: BTreeMap::from([
                ("homepage".to_string(), ScopeTable::homepage()),
                ("menu".to_string(), ScopeTable::menu()),
                ("universal".to_string(), ScopeTable::universal()),
            ]),
        }
    }
}

impl EditorConfig {
    /// Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.scope_table()?;
        Ok(config)
    }

    pub fn for_scope(scope: &str) -> Self {
        Self { page_scope: scope.to_string(), ..Self::default() }
    }

    /// `[<marker>]`, matching every addressable node.
    pub fn marker_selector(&self) -> String {
        format!("[{}]", self.marker_attribute)
    }

    /// All chrome matchers as one selector list; empty when there are none.
    pub fn chrome_selector(&self) -> String {
        self.chrome.iter().map(AncestorMatch::to_selector).collect::<Vec<_>>().join(", ")
    }

    pub fn scope_table(&self) -> Result<&ScopeTable, ConfigError> {
        self.scopes
            .get(&self.page_scope)
            .ok_or_else(|| ConfigError::UnknownScope(self.page_scope.clone()))
    }
}

/// Where the settings table and image bucket live.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub api_key: String,
    #[serde(default = "default_settings_table")]
    pub settings_table: String,
    #[serde(default = "default_bucket")]
    pub storage_bucket: String,
}

fn default_settings_table() -> String {
    "theme_settings".to_string()
}

fn default_bucket() -> String {
    "page-images".to_string()
}

impl BackendConfig {
    /// Read at build time; the browser has no process environment.
    pub fn from_build_env() -> Option<Self> {
        let base_url = option_env!("PAGE_EDITOR_API_URL")?;
        let api_key = option_env!("PAGE_EDITOR_API_KEY").unwrap_or_default();
        Some(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            settings_table: default_settings_table(),
            storage_bucket: default_bucket(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_follow_the_configured_marker_and_chrome() {
        let config = EditorConfig::default();
        assert_eq!(config.marker_selector(), "[data-editable]");
        assert_eq!(config.chrome_selector(), ".visual-editor-chrome");

        let config = EditorConfig::from_json(
            r#"{"marker_attribute": "data-visual-id", "chrome": [{"class": "admin-panel"}, {"tag": "aside"}]}"#,
        )
        .unwrap();
        assert_eq!(config.marker_selector(), "[data-visual-id]");
        assert_eq!(config.chrome_selector(), ".admin-panel, aside");

        let bare = EditorConfig { chrome: Vec::new(), ..EditorConfig::default() };
        assert_eq!(bare.chrome_selector(), "");
    }

    #[test]
    fn subtitle_is_text_not_heading() {
        let table = ScopeTable::homepage();
        assert_eq!(table.classify("hero-subtitle", "p"), SemanticType::Text);
        assert_eq!(table.classify("hero-title", "h1"), SemanticType::Heading);
        assert_eq!(table.classify("category-coffee-icon", "span"), SemanticType::Icon);
        assert_eq!(table.classify("category-coffee-card", "div"), SemanticType::Container);
    }

    #[test]
    fn unmatched_id_falls_back_to_tag() {
        let table = ScopeTable::homepage();
        assert_eq!(table.classify("opening-hours", "p"), SemanticType::Text);
        assert_eq!(table.classify("x", "img"), SemanticType::Image);
        assert_eq!(table.classify("x", "canvas"), SemanticType::Unknown);
    }

    #[test]
    fn menu_section_title_is_heading() {
        let table = ScopeTable::menu();
        assert_eq!(table.classify("drinks-section-title", "h2"), SemanticType::Heading);
        assert_eq!(table.classify("drinks-section", "section"), SemanticType::Container);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EditorConfig::from_json(r#"{ "page_scope": "menu", "heuristic": true }"#).unwrap();
        assert_eq!(config.marker_attribute, DEFAULT_MARKER);
        assert!(config.heuristic);
        assert_eq!(config.scope_table().unwrap(), &ScopeTable::menu());
    }

    #[test]
    fn unknown_scope_is_rejected() {
        let err = EditorConfig::from_json(r#"{ "page_scope": "checkout" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownScope(scope) if scope == "checkout"));
    }

    #[test]
    fn scope_tables_round_trip_through_json() {
        let json = serde_json::to_string(&ScopeTable::universal()).unwrap();
        let table: ScopeTable = serde_json::from_str(&json).unwrap();
        assert_eq!(table, ScopeTable::universal());
    }
}
