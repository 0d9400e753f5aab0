//! Tool actions and the values they produce.

use serde::{Deserialize, Serialize};

use super::element::{EditProperty, SemanticType, Tool};
use crate::error::EditError;

pub const MIN_FONT_SIZE: u32 = 8;
pub const MAX_FONT_SIZE: u32 = 96;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTarget {
    Text,
    Background,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    Linear,
    Radial,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientSpec {
    pub kind: GradientKind,
    /// Ignored for radial gradients.
    pub direction: String,
    pub stops: Vec<String>,
}

impl GradientSpec {
    pub fn linear(direction: &str, stops: &[&str]) -> Self {
        Self {
            kind: GradientKind::Linear,
            direction: direction.to_string(),
            stops: stops.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn radial(stops: &[&str]) -> Self {
        Self {
            kind: GradientKind::Radial,
            direction: String::new(),
            stops: stops.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// `linear-gradient(<direction>, <c1>, <c2>[, <c3>])` or
    /// `radial-gradient(circle, <c1>, <c2>[, <c3>])`.
    pub fn to_css(&self) -> Result<String, EditError> {
        if !(2..=3).contains(&self.stops.len()) {
            return Err(EditError::invalid(
                "gradient",
                format!("needs 2 or 3 colors, got {}", self.stops.len()),
            ));
        }
        if let Some(bad) = self.stops.iter().find(|stop| !is_valid_color(stop)) {
            return Err(EditError::invalid("gradient", format!("bad color {:?}", bad)));
        }
        let stops = self.stops.iter().map(|s| s.trim()).collect::<Vec<_>>().join(", ");
        Ok(match self.kind {
            GradientKind::Linear => {
                let direction = self.direction.trim();
                if direction.contains(['(', ')', ',']) {
                    return Err(EditError::invalid("gradient", format!("bad direction {:?}", direction)));
                }
                let direction = if direction.is_empty() { "to right" } else { direction };
                format!("linear-gradient({}, {})", direction, stops)
            }
            GradientKind::Radial => format!("radial-gradient(circle, {})", stops),
        })
    }
}

/// One confirmed action in the tool panel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ToolAction {
    SetText(String),
    SetFontSize(u32),
    SetColor { target: ColorTarget, value: String },
    SetGradient(GradientSpec),
    /// An image URL, or a single emoji for icon elements.
    SetImage(String),
}

impl ToolAction {
    pub fn tool(&self) -> Tool {
        match self {
            ToolAction::SetText(_) | ToolAction::SetFontSize(_) => Tool::Text,
            ToolAction::SetColor { .. } => Tool::Color,
            ToolAction::SetGradient(_) => Tool::Gradient,
            ToolAction::SetImage(_) => Tool::Image,
        }
    }

    /// The property this action writes and the value to store for it.
    pub fn resolve(&self, semantic_type: SemanticType) -> Result<(EditProperty, String), EditError> {
        match self {
            ToolAction::SetText(text) => Ok((EditProperty::Text, text.clone())),
            ToolAction::SetFontSize(size) => {
                if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(size) {
                    return Err(EditError::invalid(
                        "font size",
                        format!("{} outside {}..={}", size, MIN_FONT_SIZE, MAX_FONT_SIZE),
                    ));
                }
                Ok((EditProperty::FontSize, size.to_string()))
            }
            ToolAction::SetColor { target, value } => {
                let value = value.trim();
                if !is_valid_color(value) {
                    return Err(EditError::invalid("color", format!("expected hex or transparent, got {:?}", value)));
                }
                let property = match target {
                    ColorTarget::Text => EditProperty::Color,
                    ColorTarget::Background => EditProperty::BackgroundColor,
                };
                Ok((property, value.to_string()))
            }
            ToolAction::SetGradient(spec) => Ok((EditProperty::Background, spec.to_css()?)),
            ToolAction::SetImage(value) => {
                let value = value.trim();
                if semantic_type == SemanticType::Icon {
                    if !is_single_emoji(value) {
                        return Err(EditError::invalid("icon", "expected a single emoji"));
                    }
                    return Ok((EditProperty::Icon, value.to_string()));
                }
                if !is_image_url(value) {
                    return Err(EditError::invalid("image", format!("not a URL: {:?}", value)));
                }
                Ok((EditProperty::Image, value.to_string()))
            }
        }
    }
}

/// `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` or `transparent`.
pub fn is_valid_color(value: &str) -> bool {
    let value = value.trim();
    if value.eq_ignore_ascii_case("transparent") {
        return true;
    }
    match value.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

pub fn is_image_url(value: &str) -> bool {
    ["https://", "http://", "/", "data:image/"]
        .iter()
        .any(|prefix| value.starts_with(prefix) && value.len() > prefix.len())
}

fn is_pictographic(c: char) -> bool {
    matches!(c as u32,
        0x1F300..=0x1FAFF | 0x2600..=0x27BF | 0x2B00..=0x2BFF | 0x1F000..=0x1F2FF | 0x2300..=0x23FF)
}

fn is_emoji_modifier(c: char) -> bool {
    matches!(c as u32, 0xFE0E | 0xFE0F | 0x200D | 0x1F3FB..=0x1F3FF | 0x20E3)
}

/// True for exactly one pictographic codepoint, optionally followed by
/// variation selectors or skin-tone modifiers.
pub fn is_single_emoji(value: &str) -> bool {
    let mut chars = value.trim().chars();
    let Some(first) = chars.next() else {
        return false;
    };
    is_pictographic(first) && chars.all(is_emoji_modifier)
}
