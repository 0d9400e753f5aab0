use cafe_page_editor::{
    dom::LiveDocument,
    error::{EditError, GatewayError, UploadError},
    persistence::{MemoryGateway, MemoryUploader},
    visual_editor::{
        pending::commit_batch, ApplyOutcome, ChangeKey, ColorTarget, EditProperty, ToolAction,
    },
};

use crate::common::{editor_for, homepage_document, homepage_editor, node};

mod common;

fn cyan() -> ToolAction {
    ToolAction::SetColor { target: ColorTarget::Text, value: "#00FFFF".into() }
}

// =========================================================================
// Commit
// =========================================================================

#[tokio::test]
async fn empty_commit_touches_nothing() {
    let mut editor = homepage_editor();
    let gateway = MemoryGateway::new();

    let report = editor.commit_all(&gateway).await;

    assert!(report.is_empty());
    assert!(gateway.calls().is_empty(), "no gateway call for an empty store");
    assert!(editor.pending().last_saved().is_none());
}

#[tokio::test]
async fn hero_title_edit_round_trip() {
    let mut editor = homepage_editor();
    let gateway = MemoryGateway::new();

    editor.select("hero-title");
    editor.apply(ToolAction::SetText("Welcome".into())).unwrap();
    editor.apply(cyan()).unwrap();
    assert_eq!(editor.pending().len(), 2);

    let report = editor.commit_all(&gateway).await;

    assert!(report.is_success());
    assert_eq!(report.succeeded.len(), 2);
    assert!(editor.pending().is_empty(), "committed entries leave the store");
    assert!(editor.pending().last_saved().is_some());

    assert_eq!(gateway.value("homepage", "hero-title_text").as_deref(), Some("Welcome"));
    assert_eq!(gateway.value("homepage", "hero-title_color").as_deref(), Some("#00FFFF"));
    assert!(gateway.calls().iter().all(|w| w.category == "page_editor" && w.page_scope == "homepage"));

    assert_eq!(editor.document().text_of("hero-title").as_deref(), Some("Welcome"));
    assert_eq!(editor.document().style_of("hero-title", "color").as_deref(), Some("#00FFFF"));
}

#[tokio::test]
async fn commit_goes_in_key_order() {
    let mut editor = homepage_editor();
    let gateway = MemoryGateway::new();

    editor.select("hero-title");
    editor.apply(cyan()).unwrap();
    editor.apply(ToolAction::SetText("Welcome".into())).unwrap();
    editor.select("hero-subtitle");
    editor.apply(ToolAction::SetText("Open late".into())).unwrap();

    editor.commit_all(&gateway).await;

    let keys: Vec<String> = gateway.calls().into_iter().map(|w| w.setting_key).collect();
    assert_eq!(keys, vec!["hero-subtitle_text", "hero-title_text", "hero-title_color"]);
}

#[tokio::test]
async fn failed_writes_stay_pending() {
    let mut editor = homepage_editor();
    let gateway = MemoryGateway::new();
    gateway.fail_on("hero-subtitle_text");

    editor.select("hero-title");
    editor.apply(ToolAction::SetText("Welcome".into())).unwrap();
    editor.apply(cyan()).unwrap();
    editor.select("hero-subtitle");
    editor.apply(ToolAction::SetText("Open late".into())).unwrap();

    let report = editor.commit_all(&gateway).await;

    assert_eq!(report.succeeded.len(), 2);
    assert_eq!(report.failed.len(), 1);
    let (failed_key, error) = &report.failed[0];
    assert_eq!(failed_key.setting_key(), "hero-subtitle_text");
    assert!(matches!(error, GatewayError::Rejected { status: 500, .. }));

    assert_eq!(editor.pending().len(), 1, "exactly the failed entry remains");
    assert!(editor.pending().get(&ChangeKey::new("hero-subtitle", EditProperty::Text)).is_some());
    assert!(editor.pending().last_saved().is_none(), "partial failure is not a save");

    gateway.recover("hero-subtitle_text");
    let retry = editor.commit_all(&gateway).await;
    assert!(retry.is_success());
    assert_eq!(retry.succeeded.len(), 1);
    assert!(editor.pending().is_empty());
}

#[tokio::test]
async fn discard_after_commit_keeps_committed_values() {
    let mut editor = homepage_editor();
    let gateway = MemoryGateway::new();

    editor.select("hero-title");
    editor.apply(ToolAction::SetText("Welcome".into())).unwrap();
    editor.commit_all(&gateway).await;

    assert_eq!(editor.discard_all(), 0);
    assert_eq!(editor.document().text_of("hero-title").as_deref(), Some("Welcome"));
}

#[tokio::test]
async fn committing_the_same_value_twice_is_an_upsert() {
    let gateway = MemoryGateway::new();

    for _ in 0..2 {
        let mut editor = homepage_editor();
        editor.select("hero-title");
        editor.apply(cyan()).unwrap();
        editor.commit_all(&gateway).await;
    }

    assert_eq!(gateway.calls().len(), 2);
    assert_eq!(gateway.len(), 1, "one stored row per key and scope");
}

#[tokio::test]
async fn commit_includes_the_open_text_draft() {
    let mut editor = homepage_editor();
    let gateway = MemoryGateway::new();

    editor.select("hero-title");
    editor.begin_text_edit().unwrap();
    editor.update_draft("Typed but not confirmed");

    editor.commit_all(&gateway).await;

    assert_eq!(
        gateway.value("homepage", "hero-title_text").as_deref(),
        Some("Typed but not confirmed")
    );
    assert!(editor.draft().is_none());
}

#[tokio::test]
async fn edit_made_while_a_commit_is_in_flight_stays_pending() {
    let mut editor = homepage_editor();
    let gateway = MemoryGateway::new();

    editor.select("hero-title");
    editor.apply(cyan()).unwrap();

    let batch = editor.begin_commit();
    let target = editor.commit_target();
    editor
        .apply(ToolAction::SetColor { target: ColorTarget::Text, value: "#ff0080".into() })
        .unwrap();
    let report = commit_batch(&gateway, &target, batch).await;
    editor.finish_commit(&report);

    let key = ChangeKey::new("hero-title", EditProperty::Color);
    assert_eq!(editor.pending().get(&key).map(|c| c.value.as_str()), Some("#ff0080"));
    assert_eq!(gateway.value("homepage", "hero-title_color").as_deref(), Some("#00FFFF"));
}

// =========================================================================
// Loading committed state
// =========================================================================

#[tokio::test]
async fn a_fresh_page_shows_what_was_committed() {
    let gateway = MemoryGateway::new();
    {
        let mut editor = homepage_editor();
        editor.select("hero-title");
        editor.apply(ToolAction::SetText("Welcome".into())).unwrap();
        editor.select("category-coffee-icon");
        editor.apply(ToolAction::SetImage("🍵".into())).unwrap();
        editor.commit_all(&gateway).await;
    }

    let editor = homepage_editor();
    assert_eq!(editor.load_committed(&gateway).await, 2);
    assert_eq!(editor.document().text_of("hero-title").as_deref(), Some("Welcome"));
    assert_eq!(editor.document().text_of("category-coffee-icon").as_deref(), Some("🍵"));

    let menu = editor_for(homepage_document(), "menu");
    assert_eq!(menu.load_committed(&gateway).await, 0, "scopes do not leak");
}

// =========================================================================
// Uploads
// =========================================================================

#[tokio::test]
async fn upload_previews_the_returned_url() {
    let mut editor = homepage_editor();
    let uploader = MemoryUploader::new();
    editor.select("about-photo");

    let outcome = editor.upload_image(&uploader, "terrace.jpg", vec![0xFF, 0xD8]).await;

    assert_eq!(outcome, Ok(ApplyOutcome::Applied));
    let photo = node(&editor, "about-photo");
    assert_eq!(
        editor.document().attribute(&photo, "src").as_deref(),
        Some("/memory/images/1-terrace.jpg")
    );
    assert_eq!(editor.pending().len(), 1);
}

#[tokio::test]
async fn logo_uploads_go_to_the_headers_folder() {
    let mut editor = homepage_editor();
    let uploader = MemoryUploader::new();
    editor.select("header-logo");

    editor.upload_image(&uploader, "logo.png", vec![1]).await.unwrap();

    let logo = node(&editor, "header-logo");
    assert_eq!(editor.document().attribute(&logo, "src").as_deref(), Some("/memory/headers/1-logo.png"));
}

#[tokio::test]
async fn failed_upload_records_nothing() {
    let mut editor = homepage_editor();
    let uploader = MemoryUploader::failing();
    editor.select("about-photo");

    let outcome = editor.upload_image(&uploader, "terrace.jpg", vec![1, 2, 3]).await;

    assert_eq!(outcome, Err(EditError::Upload(UploadError::Rejected(503))));
    assert!(editor.pending().is_empty());
    let photo = node(&editor, "about-photo");
    assert_eq!(editor.document().attribute(&photo, "src").as_deref(), Some("/assets/interior.jpg"));
}

#[tokio::test]
async fn icons_refuse_uploads() {
    let mut editor = homepage_editor();
    let uploader = MemoryUploader::new();
    editor.select("category-coffee-icon");

    let outcome = editor.upload_image(&uploader, "cup.png", vec![1]).await;

    assert!(matches!(outcome, Err(EditError::InvalidValue { field: "icon", .. })));
    assert_eq!(uploader.uploads(), 0, "uploader never called");
    assert!(editor.pending().is_empty());
}
