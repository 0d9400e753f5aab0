use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Coarse classification of an editable element. Decides which tools apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Heading,
    Text,
    Button,
    Badge,
    Image,
    Icon,
    Container,
    Unknown,
}

impl SemanticType {
    pub fn as_str(self) -> &'static str {
        match self {
            SemanticType::Heading => "heading",
            SemanticType::Text => "text",
            SemanticType::Button => "button",
            SemanticType::Badge => "badge",
            SemanticType::Image => "image",
            SemanticType::Icon => "icon",
            SemanticType::Container => "container",
            SemanticType::Unknown => "unknown",
        }
    }

    /// Fallback classification when no id rule matched.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => SemanticType::Heading,
            "p" | "span" | "li" | "label" | "blockquote" | "small" | "strong" | "em" => {
                SemanticType::Text
            }
            "button" | "a" => SemanticType::Button,
            "img" | "picture" => SemanticType::Image,
            "div" | "section" | "article" | "header" | "footer" | "main" | "nav" | "aside" => {
                SemanticType::Container
            }
            _ => SemanticType::Unknown,
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Text,
    Color,
    Gradient,
    Image,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::Text, Tool::Color, Tool::Gradient, Tool::Image];

    pub fn label(self) -> &'static str {
        match self {
            Tool::Text => "Text",
            Tool::Color => "Color",
            Tool::Gradient => "Gradient",
            Tool::Image => "Image",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A subset of [`Tool::ALL`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolSet(BTreeSet<Tool>);

impl ToolSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn of(tools: &[Tool]) -> Self {
        Self(tools.iter().copied().collect())
    }

    pub fn contains(&self, tool: Tool) -> bool {
        self.0.contains(&tool)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Tool> + '_ {
        self.0.iter().copied()
    }
}

/// The property a pending change targets. One element may carry several
/// independent pending changes, one per property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditProperty {
    Text,
    FontSize,
    Color,
    BackgroundColor,
    Background,
    Image,
    /// Emoji content of an icon element. Persisted under the same key name as
    /// `Image`; an element is never both.
    Icon,
}

impl EditProperty {
    /// Name used in pending-change keys and persisted setting keys.
    pub fn key_name(self) -> &'static str {
        match self {
            EditProperty::Text => "text",
            EditProperty::FontSize => "fontSize",
            EditProperty::Color => "color",
            EditProperty::BackgroundColor => "backgroundColor",
            EditProperty::Background => "background",
            EditProperty::Image | EditProperty::Icon => "image",
        }
    }

    /// Inverse of [`EditProperty::key_name`]. `image` resolves by semantic type.
    pub fn from_key_name(name: &str, semantic_type: SemanticType) -> Option<Self> {
        Some(match name {
            "text" => EditProperty::Text,
            "fontSize" => EditProperty::FontSize,
            "color" => EditProperty::Color,
            "backgroundColor" => EditProperty::BackgroundColor,
            "background" => EditProperty::Background,
            "image" if semantic_type == SemanticType::Icon => EditProperty::Icon,
            "image" => EditProperty::Image,
            _ => return None,
        })
    }
}

impl fmt::Display for EditProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key_name())
    }
}

/// Computed style captured when the element was scanned.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleSnapshot {
    pub color: String,
    pub background_color: String,
    pub font_size: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementDescriptor {
    pub id: String,
    pub tag: String,
    pub semantic_type: SemanticType,
    pub allowed_tools: ToolSet,
    pub current_text: String,
    pub style: StyleSnapshot,
}

impl ElementDescriptor {
    pub fn allows(&self, tool: Tool) -> bool {
        self.allowed_tools.contains(tool)
    }
}
