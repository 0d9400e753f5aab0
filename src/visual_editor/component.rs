use dioxus::prelude::*;
use wasm_bindgen::JsCast;

use super::editor::PageEditor;
use super::element::Tool;
use super::pending::CommitReport;
use super::styles_editor::{ColorTool, GradientTool, ImageTool, TextTool};
use super::tools::{ColorTarget, ToolAction};
use crate::config::{EditorConfig, CHROME_CLASS};
use crate::dom::WebDocument;
use crate::error::EditError;
use crate::persistence::Backend;

#[derive(Clone, Debug, PartialEq)]
pub enum EditorMode {
    Editor,
    Preview,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }

    pub fn from_report(report: &CommitReport) -> Self {
        if report.is_success() {
            Notice::info(format!("Saved {} change(s)", report.succeeded.len()))
        } else {
            let failed = report
                .failed
                .iter()
                .map(|(key, _)| key.setting_key())
                .collect::<Vec<_>>()
                .join(", ");
            Notice::error(format!(
                "{} saved, {} failed: {}",
                report.succeeded.len(),
                report.failed.len(),
                failed
            ))
        }
    }
}

pub struct EditorState {
    pub editor: Option<PageEditor<WebDocument>>,
    pub mode: EditorMode,
    pub active_tool: Option<Tool>,
    pub color_target: ColorTarget,
    pub notice: Option<Notice>,
    pub saving: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            editor: None,
            mode: EditorMode::Editor,
            active_tool: None,
            color_target: ColorTarget::Text,
            notice: None,
            saving: false,
        }
    }
}

pub static EDITOR_STATE: GlobalSignal<EditorState> = Signal::global(EditorState::default);
pub static BACKEND: GlobalSignal<Backend> = Signal::global(Backend::from_build_env);

const EDITOR_CSS: &str = r#"
.visual-editor-highlight { outline: 2px dashed rgba(0, 255, 255, 0.5); outline-offset: 2px; cursor: pointer; }
.visual-editor-hover { outline: 2px solid #00ffff; background-color: rgba(0, 255, 255, 0.1); }
.visual-editor-selected { outline: 3px solid #ff0080; background-color: rgba(255, 0, 128, 0.1); }
.visual-editor-chrome { font-family: system-ui; font-size: 13px; }
.visual-editor-chrome button { cursor: pointer; }
"#;

/// Admin editor for one page scope: the page itself plus the editor chrome.
#[component]
pub fn VisualEditor(scope: String, children: Element) -> Element {
    use_drop(leave_editor);

    let state = EDITOR_STATE.read();
    let editor_bg = if state.mode == EditorMode::Editor { "#00ffff" } else { "#333" };
    let preview_bg = if state.mode == EditorMode::Preview { "#00ffff" } else { "#333" };
    let pending = state.editor.as_ref().map(|e| e.pending().len()).unwrap_or(0);
    let last_saved = state
        .editor
        .as_ref()
        .and_then(|e| e.pending().last_saved())
        .map(|t| t.format("%H:%M:%S").to_string());
    let mount_scope = scope.clone();

    rsx! {
        style { "{EDITOR_CSS}" }
        div {
            class: "visual-editor",
            style: "display: flex; min-height: 100vh;",

            div {
                class: "page-canvas",
                style: "flex: 1; overflow-y: auto;",
                onmounted: move |_| mount_editor(&mount_scope),
                EditableSurface { {children} }
            }

            div {
                class: "properties {CHROME_CLASS}",
                style: "width: 300px; background: #111; color: white; padding: 12px;",

                h2 { style: "margin: 0 0 12px 0; font-size: 16px; color: #00ffff;", "Editing: {scope}" }

                div {
                    class: "mode-toggle",
                    style: "margin-bottom: 12px; display: flex; gap: 8px;",
                    button {
                        onclick: move |_| set_mode(EditorMode::Editor),
                        style: "background: {editor_bg};",
                        "Editor"
                    }
                    button {
                        onclick: move |_| set_mode(EditorMode::Preview),
                        style: "background: {preview_bg};",
                        "Preview"
                    }
                }

                div {
                    style: "display: flex; gap: 8px; margin-bottom: 8px;",
                    button {
                        disabled: pending == 0 || state.saving,
                        onclick: move |_| save_all(),
                        if state.saving { "Saving..." } else { "Save ({pending})" }
                    }
                    button {
                        disabled: pending == 0 || state.saving,
                        onclick: move |_| discard_all(),
                        "Discard"
                    }
                    button {
                        onclick: move |_| rescan(),
                        "Rescan"
                    }
                }

                if let Some(saved) = last_saved {
                    div { style: "font-size: 11px; color: #888;", "Last saved {saved}" }
                }

                if let Some(notice) = state.notice.clone() {
                    div {
                        style: if notice.kind == NoticeKind::Error { "color: #ff6b6b; margin: 8px 0;" } else { "color: #06ffa5; margin: 8px 0;" },
                        onclick: move |_| EDITOR_STATE.write().notice = None,
                        "{notice.text}"
                    }
                }

                if state.mode == EditorMode::Editor {
                    ToolPanel {}
                }
            }
        }
    }
}

/// Present in context while page content renders inside the editor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditingSurface;

/// Turns clicks and hovers on marked nodes into selection changes, and keeps
/// links and forms from leaving the page while editing.
#[component]
fn EditableSurface(children: Element) -> Element {
    use_context_provider(|| EditingSurface);

    rsx! {
        div {
            class: "editable-surface",
            onclick: move |e| {
                let Some(target) = event_target(&e) else {
                    return;
                };
                let (mode, unsaved) = guard_inputs();
                if mode == EditorMode::Editor {
                    if let Some(id) = marker_of(&target) {
                        e.prevent_default();
                        e.stop_propagation();
                        select_element(&id);
                        return;
                    }
                }
                if !matches!(target.closest("a[href]"), Ok(Some(_))) {
                    return;
                }
                if let Some(reason) = navigation_blocked(&mode, unsaved) {
                    e.prevent_default();
                    e.stop_propagation();
                    EDITOR_STATE.write().notice = Some(Notice::error(reason));
                }
            },
            onsubmit: move |e| {
                let (mode, unsaved) = guard_inputs();
                if let Some(reason) = navigation_blocked(&mode, unsaved) {
                    e.prevent_default();
                    EDITOR_STATE.write().notice = Some(Notice::error(reason));
                }
            },
            onmouseover: move |e| match event_target(&e).and_then(|target| marker_of(&target)) {
                Some(id) => hover_element(&id),
                None => unhover_element(),
            },
            onmouseleave: move |_| unhover_element(),
            {children}
        }
    }
}

/// Why leaving the page is refused right now, if it is.
fn navigation_blocked(mode: &EditorMode, unsaved: bool) -> Option<&'static str> {
    match mode {
        EditorMode::Editor => Some("Navigation blocked in Editor mode, switch to Preview to follow links"),
        EditorMode::Preview if unsaved => Some("Save or discard your changes before leaving the page"),
        EditorMode::Preview => None,
    }
}

fn guard_inputs() -> (EditorMode, bool) {
    let state = EDITOR_STATE.read();
    let unsaved = state.editor.as_ref().is_some_and(|e| e.has_unsaved_changes());
    (state.mode.clone(), unsaved)
}

fn event_target(e: &Event<MouseData>) -> Option<web_sys::Element> {
    let raw = e.data().downcast::<web_sys::MouseEvent>()?.clone();
    raw.target()?.dyn_into::<web_sys::Element>().ok()
}

/// The marker value of the nearest marked ancestor, using the mounted
/// editor's marker attribute and chrome matchers.
fn marker_of(target: &web_sys::Element) -> Option<String> {
    let state = EDITOR_STATE.read();
    let config = state.editor.as_ref()?.config();
    let marked = target.closest(&config.marker_selector()).ok()??;
    let chrome = config.chrome_selector();
    if !chrome.is_empty() && matches!(marked.closest(&chrome), Ok(Some(_))) {
        return None;
    }
    marked.get_attribute(&config.marker_attribute)
}

#[component]
fn ToolPanel() -> Element {
    let state = EDITOR_STATE.read();

    let Some(descriptor) = state.editor.as_ref().and_then(|e| e.selected()).cloned() else {
        return rsx! {
            div {
                style: "color: #888; text-align: center; padding: 32px;",
                "Click any highlighted element"
            }
        };
    };
    let active = state.active_tool.filter(|tool| descriptor.allows(*tool));
    let pending_here = state
        .editor
        .as_ref()
        .map(|e| e.pending().for_element(&descriptor.id).count())
        .unwrap_or(0);
    let semantic_type = descriptor.semantic_type.to_string();
    let tag = &descriptor.tag;

    rsx! {
        div { class: "tool-panel",
            div {
                style: "display: flex; justify-content: space-between; align-items: center;",
                h3 { style: "margin: 12px 0; font-size: 14px;", "{descriptor.id}" }
                button { onclick: move |_| close_panel(), "Close" }
            }
            div { style: "font-size: 11px; color: #aaa; margin-bottom: 8px;",
                "{semantic_type} <{tag}> · {pending_here} pending"
            }

            if descriptor.allowed_tools.is_empty() {
                div { style: "color: #888;", "No tools for this element" }
            }

            div {
                style: "display: flex; gap: 4px; margin-bottom: 12px;",
                for tool in descriptor.allowed_tools.iter() {
                    button {
                        key: "{tool}",
                        style: if active == Some(tool) { "background: #ff0080; color: white;" } else { "background: #333; color: #ccc;" },
                        onclick: move |_| set_active_tool(tool),
                        "{tool}"
                    }
                }
            }

            {match active {
                Some(Tool::Text) => rsx! { TextTool {} },
                Some(Tool::Color) => rsx! { ColorTool {} },
                Some(Tool::Gradient) => rsx! { GradientTool {} },
                Some(Tool::Image) => rsx! { ImageTool { semantic_type: descriptor.semantic_type } },
                None => rsx! {},
            }}
        }
    }
}

/// Public page wrapper: applies committed edits once the page is on screen.
#[component]
pub fn SavedContent(scope: String, children: Element) -> Element {
    rsx! {
        div {
            onmounted: move |_| {
                let scope = scope.clone();
                async move { restore_saved(&scope).await }
            },
            {children}
        }
    }
}

fn notify(result: Result<(), EditError>) {
    if let Err(err) = result {
        EDITOR_STATE.write().notice = Some(Notice::error(err.to_string()));
    }
}

fn mount_editor(scope: &str) {
    let document = match WebDocument::from_window() {
        Ok(document) => document,
        Err(err) => {
            tracing::error!("Editor unavailable: {}", err);
            return;
        }
    };
    let editor = match PageEditor::new(document, EditorConfig::for_scope(scope)) {
        Ok(editor) => editor,
        Err(err) => {
            EDITOR_STATE.write().notice = Some(Notice::error(err.to_string()));
            return;
        }
    };

    let mut state = EDITOR_STATE.write();
    let editor = state.editor.insert(editor);
    let found = editor.scan().len();
    tracing::info!("Editor mounted for {} with {} editable elements", scope, found);

    let scope = scope.to_string();
    spawn(async move { restore_saved(&scope).await });
}

fn leave_editor() {
    let mut state = EDITOR_STATE.write();
    if let Some(mut editor) = state.editor.take() {
        editor.deselect();
        editor.clear_highlights();
        if editor.has_unsaved_changes() {
            tracing::warn!("Left the editor with {} unsaved change(s)", editor.pending().len());
        }
    }
    state.active_tool = None;
    state.notice = None;
}

async fn restore_saved(scope: &str) {
    let config = EditorConfig::for_scope(scope);
    let backend = BACKEND.read().clone();
    let settings = backend.load(&config.page_scope, &config.category).await;
    if settings.is_empty() {
        return;
    }

    let state = EDITOR_STATE.read();
    let applied = match state.editor.as_ref() {
        Some(editor) if editor.config().page_scope == scope => editor.restore_committed(&settings),
        _ => match WebDocument::from_window().map(|doc| PageEditor::new(doc, config)) {
            Ok(Ok(mut viewer)) => {
                viewer.scan();
                let applied = viewer.restore_committed(&settings);
                viewer.clear_highlights();
                applied
            }
            _ => 0,
        },
    };
    tracing::debug!("Restored {} saved setting(s) on {}", applied, scope);
}

fn rescan() {
    if let Some(editor) = EDITOR_STATE.write().editor.as_mut() {
        editor.scan();
    }
}

fn select_element(id: &str) {
    let mut state = EDITOR_STATE.write();
    let selected = state.editor.as_mut().map(|e| e.select(id)).unwrap_or(false);
    if selected {
        state.active_tool = None;
    }
}

fn hover_element(id: &str) {
    {
        let state = EDITOR_STATE.read();
        let unchanged = state.editor.as_ref().is_some_and(|e| e.selection().hovered() == Some(id));
        if state.mode != EditorMode::Editor || unchanged {
            return;
        }
    }
    if let Some(editor) = EDITOR_STATE.write().editor.as_mut() {
        editor.hover(id);
    }
}

fn unhover_element() {
    let hovering = EDITOR_STATE
        .read()
        .editor
        .as_ref()
        .is_some_and(|e| e.selection().hovered().is_some());
    if !hovering {
        return;
    }
    if let Some(editor) = EDITOR_STATE.write().editor.as_mut() {
        editor.unhover();
    }
}

fn close_panel() {
    let mut state = EDITOR_STATE.write();
    if let Some(editor) = state.editor.as_mut() {
        editor.close_panel();
    }
    state.active_tool = None;
}

fn set_active_tool(tool: Tool) {
    let mut state = EDITOR_STATE.write();
    state.active_tool = Some(tool);
    if tool == Tool::Text {
        let result = state.editor.as_mut().map(|e| e.begin_text_edit()).unwrap_or(Ok(()));
        if let Err(err) = result {
            state.notice = Some(Notice::error(err.to_string()));
        }
    }
}

fn set_mode(mode: EditorMode) {
    let mut state = EDITOR_STATE.write();
    if mode == EditorMode::Preview {
        if let Some(editor) = state.editor.as_mut() {
            editor.deselect();
            editor.clear_highlights();
        }
        state.active_tool = None;
    } else if let Some(editor) = state.editor.as_ref() {
        editor.sync_highlights();
    }
    state.mode = mode;
}

pub(crate) fn apply_action(action: ToolAction) {
    let result = EDITOR_STATE
        .write()
        .editor
        .as_mut()
        .ok_or(EditError::NothingSelected)
        .and_then(|e| e.apply(action))
        .map(|_| ());
    notify(result);
}

pub(crate) fn update_draft(text: &str) {
    if let Some(editor) = EDITOR_STATE.write().editor.as_mut() {
        editor.update_draft(text);
    }
}

pub(crate) fn confirm_text() {
    let result = EDITOR_STATE
        .write()
        .editor
        .as_mut()
        .ok_or(EditError::NothingSelected)
        .and_then(|e| e.confirm_text_edit())
        .map(|_| ());
    notify(result);
    // keep editing the same element
    let reopened = EDITOR_STATE
        .write()
        .editor
        .as_mut()
        .map(|e| e.begin_text_edit())
        .unwrap_or(Ok(()));
    notify(reopened);
}

pub(crate) fn cancel_text() {
    let mut state = EDITOR_STATE.write();
    if let Some(editor) = state.editor.as_mut() {
        editor.cancel_text_edit();
    }
    state.active_tool = None;
}

pub(crate) fn set_color_target(target: ColorTarget) {
    EDITOR_STATE.write().color_target = target;
}

pub(crate) async fn upload_selected(file_name: String, bytes: Vec<u8>) {
    let prepared = EDITOR_STATE
        .read()
        .editor
        .as_ref()
        .ok_or(EditError::NothingSelected)
        .and_then(|e| e.prepare_upload());
    let (id, folder) = match prepared {
        Ok(target) => target,
        Err(err) => return notify(Err(err)),
    };

    let backend = BACKEND.read().clone();
    let url = match backend.upload(&file_name, bytes, folder).await {
        Ok(url) => url,
        Err(err) => return notify(Err(EditError::Upload(err))),
    };

    let result = EDITOR_STATE
        .write()
        .editor
        .as_mut()
        .ok_or(EditError::NothingSelected)
        .and_then(|e| e.apply_to(&id, ToolAction::SetImage(url)))
        .map(|_| ());
    notify(result);
}

fn save_all() {
    let (batch, target) = {
        let mut state = EDITOR_STATE.write();
        let Some(editor) = state.editor.as_mut() else {
            return;
        };
        let batch = editor.begin_commit();
        let target = editor.commit_target();
        if batch.is_empty() {
            state.notice = Some(Notice::info("No changes to save"));
            return;
        }
        state.saving = true;
        (batch, target)
    };

    let backend = BACKEND.read().clone();
    spawn(async move {
        let report = backend.commit(&target, batch).await;
        let mut state = EDITOR_STATE.write();
        state.saving = false;
        if let Some(editor) = state.editor.as_mut() {
            editor.finish_commit(&report);
        }
        state.notice = Some(Notice::from_report(&report));
    });
}

fn discard_all() {
    let mut state = EDITOR_STATE.write();
    let count = state.editor.as_mut().map(|e| e.discard_all()).unwrap_or(0);
    state.notice = Some(Notice::info(format!("Reverted {} change(s)", count)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_mode_always_blocks_navigation() {
        assert!(navigation_blocked(&EditorMode::Editor, false).is_some());
        assert!(navigation_blocked(&EditorMode::Editor, true).is_some());
    }

    #[test]
    fn preview_blocks_only_with_unsaved_work() {
        assert_eq!(navigation_blocked(&EditorMode::Preview, false), None);
        assert_eq!(
            navigation_blocked(&EditorMode::Preview, true),
            Some("Save or discard your changes before leaving the page")
        );
    }
}
