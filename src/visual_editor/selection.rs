use serde::{Deserialize, Serialize};

/// How an element should look right now. Derived, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Highlight {
    None,
    Hover,
    Selected,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    selected: Option<String>,
    hovered: Option<String>,
}

impl Selection {
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// Returns the previously selected id when the selection moved.
    pub fn select(&mut self, id: &str) -> Option<Option<String>> {
        self.hovered = None;
        if self.is_selected(id) {
            return None;
        }
        Some(self.selected.replace(id.to_string()))
    }

    pub fn deselect(&mut self) -> Option<String> {
        self.selected.take()
    }

    pub fn hover(&mut self, id: &str) {
        if !self.is_selected(id) {
            self.hovered = Some(id.to_string());
        }
    }

    pub fn unhover(&mut self) {
        self.hovered = None;
    }

    pub fn highlight(&self, id: &str) -> Highlight {
        if self.is_selected(id) {
            Highlight::Selected
        } else if self.hovered.as_deref() == Some(id) {
            Highlight::Hover
        } else {
            Highlight::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_is_idempotent_and_clears_hover() {
        let mut selection = Selection::default();
        selection.hover("a");
        assert_eq!(selection.select("a"), Some(None));
        assert_eq!(selection.hovered(), None);
        assert_eq!(selection.select("a"), None);
        assert_eq!(selection.highlight("a"), Highlight::Selected);
    }

    #[test]
    fn hovering_the_selected_element_is_ignored() {
        let mut selection = Selection::default();
        selection.select("a");
        selection.hover("a");
        assert_eq!(selection.hovered(), None);
        selection.hover("b");
        assert_eq!(selection.highlight("b"), Highlight::Hover);
        assert_eq!(selection.select("b"), Some(Some("a".to_string())));
        assert_eq!(selection.highlight("a"), Highlight::None);
        assert_eq!(selection.highlight("b"), Highlight::Selected);
    }
}
