//! JSON File Store Integration Tests
//!
//! Tests for settings pages backed by the JSON file store:
//! - Submitted values land in the options file
//! - A fresh store over the same file sees them
//! - Integer coercion and removals persist

mod common;

use common::{example_registry, read_options_file, row, FileFixture, DOMAIN, PAGE};
use optpage::{
    Caller, JsonFileStore, MenuRecorder, OptionStore, PageRequest, SettingsPages, SubmitRequest,
};
use serde_json::json;
use std::sync::Arc;

fn pages_over(store: Arc<JsonFileStore>) -> SettingsPages {
    let pages = SettingsPages::builder(example_registry(), store).build();
    pages.bootstrap(&MenuRecorder::new()).unwrap();
    pages
}

#[test]
fn test_submit_writes_options_file() {
    let fixture = FileFixture::new();
    let pages = pages_over(fixture.store.clone());

    let form = SubmitRequest::new(DOMAIN, Caller::administrator())
        .value("option_key_1", "true")
        .value("option_key_3", "0042");
    pages.handle_submit(&form).unwrap();

    let file = read_options_file(&fixture).unwrap();
    assert_eq!(file["option_key_1"], json!("true"));
    assert_eq!(file["option_key_3"], json!(42));
    assert!(file.get("option_key_4").is_none());
}

#[test]
fn test_values_survive_reopen() {
    let fixture = FileFixture::new();
    {
        let pages = pages_over(fixture.store.clone());
        let form = SubmitRequest::new(DOMAIN, Caller::administrator())
            .value("option_key_2", "yellow")
            .value("option_key_4", "persisted");
        pages.handle_submit(&form).unwrap();
    }

    let reopened = Arc::new(JsonFileStore::new(fixture.options_path()));
    assert_eq!(
        reopened.get("option_key_4").unwrap(),
        Some(json!("persisted"))
    );

    let html = pages_over(reopened)
        .render_page(&PageRequest::new(PAGE, Caller::administrator()))
        .unwrap()
        .markup;
    assert!(row(&html, "option_key_2")
        .unwrap()
        .contains(r#"<option value="yellow" selected="selected">Yellow flower</option>"#));
}

#[test]
fn test_cleared_integer_removed_from_file() {
    let fixture = FileFixture::new();
    let pages = pages_over(fixture.store.clone());

    let set = SubmitRequest::new(DOMAIN, Caller::administrator()).value("option_key_3", "9");
    pages.handle_submit(&set).unwrap();
    assert_eq!(read_options_file(&fixture).unwrap()["option_key_3"], json!(9));

    let clear = SubmitRequest::new(DOMAIN, Caller::administrator()).value("option_key_3", "nine");
    pages.handle_submit(&clear).unwrap();
    assert!(read_options_file(&fixture)
        .unwrap()
        .get("option_key_3")
        .is_none());
}

#[test]
fn test_external_edit_after_invalidate() {
    let fixture = FileFixture::new();
    fixture.store.set("option_key_4", json!("before")).unwrap();

    std::fs::write(fixture.options_path(), r#"{"option_key_4": "after"}"#).unwrap();
    assert_eq!(
        fixture.store.get("option_key_4").unwrap(),
        Some(json!("before"))
    );

    fixture.store.invalidate_cache();
    assert_eq!(
        fixture.store.get("option_key_4").unwrap(),
        Some(json!("after"))
    );
}

#[test]
fn test_no_temp_file_left_behind() {
    let fixture = FileFixture::new();
    fixture.store.set("option_key_1", json!("false")).unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(fixture.temp_dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
