//! The generic editor core every page scope shares.

use tracing::{debug, info, warn};

use super::apply::{apply_value, read_live};
use super::element::{EditProperty, ElementDescriptor, SemanticType, Tool};
use super::pending::{commit_batch, ChangeKey, CommitBatch, CommitReport, CommitTarget, PendingChanges};
use super::scanner;
use super::selection::{Highlight, Selection};
use super::tools::ToolAction;
use crate::config::{EditorConfig, ScopeTable};
use crate::dom::LiveDocument;
use crate::error::{ConfigError, EditError};
use crate::persistence::{ImageUploader, PersistenceGateway, StoredSetting};

pub const HIGHLIGHT_CLASS: &str = "visual-editor-highlight";
pub const HOVER_CLASS: &str = "visual-editor-hover";
pub const SELECTED_CLASS: &str = "visual-editor-selected";

/// What happened to an edit that passed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// The element left the page since the last scan; nothing changed.
    ElementGone,
}

/// Unconfirmed text typed into the panel.
#[derive(Clone, Debug, PartialEq)]
pub struct TextDraft {
    pub element_id: String,
    pub text: String,
}

pub struct PageEditor<D: LiveDocument> {
    document: D,
    config: EditorConfig,
    table: ScopeTable,
    registry: Vec<ElementDescriptor>,
    selection: Selection,
    pending: PendingChanges,
    draft: Option<TextDraft>,
}

impl<D: LiveDocument> PageEditor<D> {
    pub fn new(document: D, config: EditorConfig) -> Result<Self, ConfigError> {
        let table = config.scope_table()?.clone();
        Ok(Self {
            document,
            config,
            table,
            registry: Vec::new(),
            selection: Selection::default(),
            pending: PendingChanges::new(),
            draft: None,
        })
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn registry(&self) -> &[ElementDescriptor] {
        &self.registry
    }

    pub fn descriptor(&self, id: &str) -> Option<&ElementDescriptor> {
        self.registry.iter().find(|d| d.id == id)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected(&self) -> Option<&ElementDescriptor> {
        self.selection.selected().and_then(|id| self.descriptor(id))
    }

    pub fn pending(&self) -> &PendingChanges {
        &self.pending
    }

    pub fn draft(&self) -> Option<&TextDraft> {
        self.draft.as_ref()
    }

    /// Pending entries or an open text draft that would be lost on leaving.
    pub fn has_unsaved_changes(&self) -> bool {
        !self.pending.is_empty() || self.draft.is_some()
    }

    pub fn commit_target(&self) -> CommitTarget {
        CommitTarget {
            page_scope: self.config.page_scope.clone(),
            category: self.config.category.clone(),
            created_by: self.config.created_by.clone(),
        }
    }

    fn live_node(&self, id: &str) -> Option<D::Node> {
        self.document.find_by_attribute(&self.config.marker_attribute, id)
    }

    /// Rebuilds the registry from the live page. A selection whose element
    /// disappeared is dropped.
    pub fn scan(&mut self) -> &[ElementDescriptor] {
        self.registry = scanner::scan(&self.document, &self.config, &self.table);
        if let Some(selected) = self.selection.selected() {
            if self.descriptor(selected).is_none() {
                debug!("Selected element {} left the page", selected);
                self.draft = None;
                self.selection.deselect();
            }
        }
        self.sync_highlights();
        &self.registry
    }

    pub fn highlight(&self, id: &str) -> Highlight {
        self.selection.highlight(id)
    }

    /// Re-derives every highlight class from the selection state.
    pub fn sync_highlights(&self) {
        for descriptor in &self.registry {
            let Some(node) = self.live_node(&descriptor.id) else {
                continue;
            };
            let state = self.selection.highlight(&descriptor.id);
            self.document.set_class(&node, HIGHLIGHT_CLASS, true);
            self.document.set_class(&node, HOVER_CLASS, state == Highlight::Hover);
            self.document.set_class(&node, SELECTED_CLASS, state == Highlight::Selected);
        }
    }

    /// Strips every editor class, for previewing the page as visitors see it.
    pub fn clear_highlights(&self) {
        for descriptor in &self.registry {
            if let Some(node) = self.live_node(&descriptor.id) {
                for class in [HIGHLIGHT_CLASS, HOVER_CLASS, SELECTED_CLASS] {
                    self.document.set_class(&node, class, false);
                }
            }
        }
    }

    pub fn hover(&mut self, id: &str) {
        if self.selection.hovered() == Some(id) || self.descriptor(id).is_none() {
            return;
        }
        self.selection.hover(id);
        self.sync_highlights();
    }

    pub fn unhover(&mut self) {
        if self.selection.hovered().is_some() {
            self.selection.unhover();
            self.sync_highlights();
        }
    }

    /// Selects `id` if it is registered and still on the page. Moving away
    /// from an element keeps its text draft as a pending change.
    pub fn select(&mut self, id: &str) -> bool {
        if self.descriptor(id).is_none() || self.live_node(id).is_none() {
            debug!("Ignoring selection of missing element {}", id);
            return false;
        }
        if !self.selection.is_selected(id) {
            self.flush_draft();
        }
        self.selection.select(id);
        self.sync_highlights();
        true
    }

    pub fn deselect(&mut self) {
        self.flush_draft();
        if self.selection.deselect().is_some() {
            self.sync_highlights();
        }
    }

    /// The panel's close button.
    pub fn close_panel(&mut self) {
        self.deselect();
    }

    fn selected_id(&self) -> Result<String, EditError> {
        self.selection
            .selected()
            .map(str::to_string)
            .ok_or(EditError::NothingSelected)
    }

    fn check_tool(&self, id: &str, tool: Tool) -> Result<SemanticType, EditError> {
        // A stale registry means the element is gone; report it as unknown
        // so no tool applies.
        let descriptor = self.descriptor(id);
        let semantic_type = descriptor.map(|d| d.semantic_type).unwrap_or(SemanticType::Unknown);
        if !descriptor.is_some_and(|d| d.allows(tool)) {
            return Err(EditError::ToolNotAllowed { tool, semantic_type });
        }
        Ok(semantic_type)
    }

    pub fn begin_text_edit(&mut self) -> Result<(), EditError> {
        let id = self.selected_id()?;
        self.check_tool(&id, Tool::Text)?;
        if self.draft.as_ref().is_some_and(|d| d.element_id == id) {
            return Ok(());
        }
        self.flush_draft();
        let text = match self.live_node(&id) {
            Some(node) => self.document.text_content(&node),
            None => return Ok(()),
        };
        self.draft = Some(TextDraft { element_id: id, text });
        Ok(())
    }

    pub fn update_draft(&mut self, text: &str) {
        if let Some(draft) = self.draft.as_mut() {
            draft.text = text.to_string();
        }
    }

    pub fn cancel_text_edit(&mut self) {
        self.draft = None;
    }

    pub fn confirm_text_edit(&mut self) -> Result<ApplyOutcome, EditError> {
        let Some(draft) = self.draft.take() else {
            return Err(EditError::NothingSelected);
        };
        self.apply_to(&draft.element_id, ToolAction::SetText(draft.text))
    }

    fn flush_draft(&mut self) {
        if self.draft.is_none() {
            return;
        }
        if let Err(err) = self.confirm_text_edit() {
            warn!("Dropping text draft: {}", err);
        }
    }

    /// Applies `action` to the selected element.
    pub fn apply(&mut self, action: ToolAction) -> Result<ApplyOutcome, EditError> {
        let id = self.selected_id()?;
        self.apply_to(&id, action)
    }

    /// Previews `action` on the live node and records it as pending.
    pub fn apply_to(&mut self, id: &str, action: ToolAction) -> Result<ApplyOutcome, EditError> {
        let semantic_type = self.check_tool(id, action.tool())?;
        let (property, value) = action.resolve(semantic_type)?;
        let Some(node) = self.live_node(id) else {
            debug!("Edit of {} skipped, element gone", id);
            return Ok(ApplyOutcome::ElementGone);
        };

        let original = read_live(&self.document, &node, property);
        apply_value(&self.document, &node, property, &value);
        self.pending.record(ChangeKey::new(id, property), value, || original);
        Ok(ApplyOutcome::Applied)
    }

    /// Folder hint for uploads to the given element.
    pub fn upload_folder(descriptor: &ElementDescriptor) -> &'static str {
        if descriptor.id.contains("logo") {
            "headers"
        } else {
            "images"
        }
    }

    /// Uploads a file for the selected image element and previews the
    /// returned URL. On failure nothing is recorded and the page is untouched.
    pub async fn upload_image<U: ImageUploader>(
        &mut self,
        uploader: &U,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<ApplyOutcome, EditError> {
        let (id, folder) = self.prepare_upload()?;
        let url = uploader.upload(file_name, bytes, folder).await?;
        self.apply_to(&id, ToolAction::SetImage(url))
    }

    /// Checks the selected element can take an upload; returns its id and
    /// the folder hint.
    pub fn prepare_upload(&self) -> Result<(String, &'static str), EditError> {
        let id = self.selected_id()?;
        let semantic_type = self.check_tool(&id, Tool::Image)?;
        if semantic_type == SemanticType::Icon {
            return Err(EditError::invalid("icon", "icons take an emoji, not an upload"));
        }
        let folder = self.descriptor(&id).map(Self::upload_folder).unwrap_or("images");
        Ok((id, folder))
    }

    pub fn begin_commit(&mut self) -> CommitBatch {
        self.flush_draft();
        self.pending.snapshot()
    }

    pub fn finish_commit(&mut self, report: &CommitReport) {
        self.pending.apply_report(report);
    }

    /// Sends every pending change through the gateway. Succeeded entries
    /// leave the store, failed ones stay for another attempt.
    pub async fn commit_all<G: PersistenceGateway>(&mut self, gateway: &G) -> CommitReport {
        let batch = self.begin_commit();
        if batch.is_empty() {
            return CommitReport::default();
        }
        let report = commit_batch(gateway, &self.commit_target(), batch).await;
        self.finish_commit(&report);
        report
    }

    /// Writes each pending entry's original value back and empties the
    /// store. Already committed values are not touched.
    pub fn discard_all(&mut self) -> usize {
        self.draft = None;
        let entries = self.pending.drain();
        let count = entries.len();
        for (key, change) in entries {
            match self.live_node(&key.element_id) {
                Some(node) => apply_value(&self.document, &node, key.property, &change.original_value),
                None => debug!("Discard of {} skipped, element gone", key.setting_key()),
            }
        }
        if count > 0 {
            info!("Discarded {} pending change(s)", count);
        }
        count
    }

    /// Applies settings saved earlier so the page shows its committed state.
    /// Does not touch the pending store. Returns how many were applied.
    pub fn restore_committed(&self, settings: &[StoredSetting]) -> usize {
        let mut applied = 0;
        for setting in settings {
            if setting.category != self.config.category {
                continue;
            }
            let Some((element_id, property_name)) = setting.setting_key.rsplit_once('_') else {
                continue;
            };
            let Some(node) = self.live_node(element_id) else {
                continue;
            };
            let semantic_type = self
                .descriptor(element_id)
                .map(|d| d.semantic_type)
                .unwrap_or_else(|| self.table.classify(element_id, &self.document.tag_name(&node)));
            let Some(property) = EditProperty::from_key_name(property_name, semantic_type) else {
                warn!("Unknown property in setting {}", setting.setting_key);
                continue;
            };
            apply_value(&self.document, &node, property, &setting.setting_value);
            applied += 1;
        }
        applied
    }

    /// Loads the page's saved settings and applies them.
    pub async fn load_committed<G: PersistenceGateway>(&self, gateway: &G) -> usize {
        match gateway.load_settings(&self.config.page_scope, &self.config.category).await {
            Ok(settings) => self.restore_committed(&settings),
            Err(err) => {
                warn!("Could not load saved settings: {}", err);
                0
            }
        }
    }
}
