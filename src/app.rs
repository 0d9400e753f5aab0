use dioxus::prelude::*;

use crate::pages::{HomePage, MenuPage};
use crate::visual_editor::{SavedContent, VisualEditor};

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[route("/")]
    Home {},
    #[route("/menu")]
    Menu {},
    #[route("/admin/editor/:scope")]
    Editor { scope: String },
}

#[component]
pub fn App() -> Element {
    rsx! {
        Router::<Route> {}
    }
}

#[component]
fn Home() -> Element {
    rsx! {
        SavedContent { scope: "homepage", HomePage {} }
    }
}

#[component]
fn Menu() -> Element {
    rsx! {
        SavedContent { scope: "menu", MenuPage {} }
    }
}

/// `/admin/editor/homepage`, `/admin/editor/menu`, ...
#[component]
fn Editor(scope: String) -> Element {
    let page = match scope.as_str() {
        "menu" => rsx! { MenuPage {} },
        _ => rsx! { HomePage {} },
    };
    rsx! {
        VisualEditor { key: "{scope}", scope: scope.clone(), {page} }
    }
}
