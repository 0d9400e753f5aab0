use dioxus::html::FileEngine;
use dioxus::prelude::*;

use super::component::{
    apply_action, cancel_text, confirm_text, set_color_target, update_draft, upload_selected, EDITOR_STATE,
};
use super::element::SemanticType;
use super::tools::{ColorTarget, GradientKind, GradientSpec, ToolAction, MAX_FONT_SIZE, MIN_FONT_SIZE};

const SWATCHES: [&str; 9] = [
    "transparent", "#1F2937", "#374151", "#4B5563", "#FF6B35", "#F7931E", "#06FFA5", "#3B82F6", "#8B5CF6",
];

const DIRECTIONS: [&str; 6] = ["to right", "to left", "to bottom", "to top", "45deg", "135deg"];

const EMOJIS: [&str; 16] = [
    "☕", "🍕", "🥐", "🧀", "🍔", "🌮", "🥗", "🍝", "🍰", "🧁", "🍪", "🥨", "🍩", "🥪", "🍳", "🥯",
];

fn gradient_presets() -> Vec<GradientSpec> {
    vec![
        GradientSpec::linear("to right", &["#FF6B35", "#F7931E"]),
        GradientSpec::linear("to right", &["#06FFA5", "#3BCEAC"]),
        GradientSpec::linear("to right", &["#8B5CF6", "#EC4899"]),
        GradientSpec::linear("45deg", &["#3B82F6", "#06B6D4"]),
        GradientSpec::radial(&["#FF6B35", "#1F2937"]),
    ]
}

const LABEL: &str = "display: block; margin: 8px 0 4px 0; font-size: 11px; color: #00ffff;";

#[component]
pub fn TextTool() -> Element {
    let state = EDITOR_STATE.read();
    let draft = state
        .editor
        .as_ref()
        .and_then(|e| e.draft())
        .map(|d| d.text.clone())
        .unwrap_or_default();
    let current_size = state
        .editor
        .as_ref()
        .and_then(|e| e.selected())
        .and_then(|d| d.style.font_size.trim_end_matches("px").parse::<f64>().ok())
        .map(|px| px.round() as u32)
        .unwrap_or(16);
    let mut font_size = use_signal(|| current_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE));

    rsx! {
        div { class: "styles-editor",
            label { style: LABEL, "Content" }
            textarea {
                rows: "3",
                style: "width: 100%;",
                value: "{draft}",
                oninput: move |e| update_draft(&e.value()),
            }
            div { style: "margin-top: 8px; display: flex; gap: 8px;",
                button { onclick: move |_| confirm_text(), "Apply text" }
                button { onclick: move |_| cancel_text(), "Cancel" }
            }

            label { style: LABEL, "Font size: {font_size}px" }
            input {
                r#type: "range",
                min: "{MIN_FONT_SIZE}",
                max: "{MAX_FONT_SIZE}",
                value: "{font_size}",
                oninput: move |e| {
                    if let Ok(size) = e.value().parse::<u32>() {
                        font_size.set(size);
                    }
                },
            }
            button { onclick: move |_| apply_action(ToolAction::SetFontSize(font_size())), "Apply size" }
        }
    }
}

#[component]
pub fn ColorTool() -> Element {
    let target = EDITOR_STATE.read().color_target;
    let mut picked = use_signal(|| "#00ffff".to_string());
    let text_bg = if target == ColorTarget::Text { "#ff0080" } else { "#333" };
    let background_bg = if target == ColorTarget::Background { "#ff0080" } else { "#333" };

    rsx! {
        div { class: "styles-editor",
            div { style: "display: flex; gap: 8px;",
                button {
                    style: "background: {text_bg};",
                    onclick: move |_| set_color_target(ColorTarget::Text),
                    "Text"
                }
                button {
                    style: "background: {background_bg};",
                    onclick: move |_| set_color_target(ColorTarget::Background),
                    "Background"
                }
            }

            label { style: LABEL, "Color" }
            div { style: "display: flex; gap: 8px;",
                input {
                    r#type: "color",
                    value: "{picked}",
                    oninput: move |e| picked.set(e.value()),
                }
                button {
                    onclick: move |_| apply_action(ToolAction::SetColor { target, value: picked() }),
                    "Apply"
                }
            }

            div { style: "display: flex; flex-wrap: wrap; gap: 4px; margin-top: 8px;",
                for swatch in SWATCHES {
                    button {
                        key: "{swatch}",
                        title: "{swatch}",
                        style: "width: 24px; height: 24px; border: 1px solid #555; background: {swatch};",
                        onclick: move |_| apply_action(ToolAction::SetColor { target, value: swatch.to_string() }),
                    }
                }
            }
        }
    }
}

#[component]
pub fn GradientTool() -> Element {
    let mut kind = use_signal(|| GradientKind::Linear);
    let mut direction = use_signal(|| "to right".to_string());
    let mut stops = use_signal(|| vec!["#ff00ff".to_string(), "#00ffff".to_string()]);

    let spec = GradientSpec { kind: kind(), direction: direction(), stops: stops() };
    let preview = spec.to_css().unwrap_or_else(|_| "none".to_string());
    let stop_count = stops.read().len();
    let linear_bg = if kind() == GradientKind::Linear { "#ff0080" } else { "#333" };
    let radial_bg = if kind() == GradientKind::Radial { "#ff0080" } else { "#333" };

    rsx! {
        div { class: "styles-editor",
            div { style: "display: flex; gap: 8px;",
                button { style: "background: {linear_bg};", onclick: move |_| kind.set(GradientKind::Linear), "Linear" }
                button { style: "background: {radial_bg};", onclick: move |_| kind.set(GradientKind::Radial), "Radial" }
            }

            if kind() == GradientKind::Linear {
                label { style: LABEL, "Direction" }
                select {
                    value: "{direction}",
                    onchange: move |e| direction.set(e.value()),
                    for d in DIRECTIONS {
                        option { key: "{d}", value: d, "{d}" }
                    }
                }
            }

            label { style: LABEL, "Colors" }
            for (i, stop) in stops().into_iter().enumerate() {
                div { key: "{i}", style: "display: flex; gap: 4px; margin-bottom: 4px;",
                    input {
                        r#type: "color",
                        value: "{stop}",
                        oninput: move |e| stops.write()[i] = e.value(),
                    }
                    if stop_count > 2 {
                        button {
                            onclick: move |_| {
                                stops.write().remove(i);
                            },
                            "X"
                        }
                    }
                }
            }
            if stop_count < 3 {
                button { onclick: move |_| stops.write().push("#ffffff".to_string()), "Add color" }
            }

            div { style: "height: 32px; margin: 8px 0; border-radius: 4px; background: {preview};" }
            button { onclick: move |_| apply_action(ToolAction::SetGradient(spec.clone())), "Apply gradient" }

            label { style: LABEL, "Presets" }
            div { style: "display: flex; flex-wrap: wrap; gap: 4px;",
                for preset in gradient_presets() {
                    {
                        let css = preset.to_css().unwrap_or_default();
                        rsx! {
                            button {
                                key: "{css}",
                                title: "{css}",
                                style: "width: 40px; height: 24px; border: 1px solid #555; background: {css};",
                                onclick: move |_| apply_action(ToolAction::SetGradient(preset.clone())),
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn ImageTool(semantic_type: SemanticType) -> Element {
    let mut url = use_signal(String::new);
    let mut uploading = use_signal(|| false);

    if semantic_type == SemanticType::Icon {
        return rsx! {
            div { class: "styles-editor",
                label { style: LABEL, "Icon" }
                div { style: "display: flex; flex-wrap: wrap; gap: 4px;",
                    for emoji in EMOJIS {
                        button {
                            key: "{emoji}",
                            style: "font-size: 20px; background: #222;",
                            onclick: move |_| apply_action(ToolAction::SetImage(emoji.to_string())),
                            "{emoji}"
                        }
                    }
                }
                div { style: "margin-top: 8px; display: flex; gap: 8px;",
                    input {
                        value: "{url}",
                        placeholder: "Any single emoji",
                        oninput: move |e| url.set(e.value()),
                    }
                    button { onclick: move |_| apply_action(ToolAction::SetImage(url())), "Apply" }
                }
            }
        };
    }

    rsx! {
        div { class: "styles-editor",
            label { style: LABEL, "Image URL" }
            div { style: "display: flex; gap: 8px;",
                input {
                    value: "{url}",
                    placeholder: "https://...",
                    oninput: move |e| url.set(e.value()),
                }
                button { onclick: move |_| apply_action(ToolAction::SetImage(url())), "Apply" }
            }

            label { style: LABEL, if uploading() { "Uploading..." } else { "Upload" } }
            input {
                r#type: "file",
                accept: "image/*",
                disabled: uploading(),
                onchange: move |e: FormEvent| async move {
                    let Some(engine) = e.files() else {
                        return;
                    };
                    let Some(name) = engine.files().into_iter().next() else {
                        return;
                    };
                    uploading.set(true);
                    match engine.read_file(&name).await {
                        Some(bytes) => upload_selected(name, bytes).await,
                        None => tracing::warn!("Could not read {}", name),
                    }
                    uploading.set(false);
                },
            }
        }
    }
}
