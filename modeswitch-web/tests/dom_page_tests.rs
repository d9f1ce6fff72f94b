#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use modeswitch_core::{Mode, Page, RootTarget, ToggleConfig};
use modeswitch_web::page::CLAIM_ATTR;
use modeswitch_web::{BootError, DomPage, boot, dom};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{DocumentReadyState, Event, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

const ROOT: &str = "accessibility-mode";

fn reset_page(key: &str) {
    let doc = dom::document().expect("document");
    let body = doc.body().expect("body");
    body.set_inner_html("");
    let _ = body.class_list().remove_1(ROOT);
    let html = doc.document_element().expect("html element");
    let _ = html.class_list().remove_1(ROOT);
    let _ = html.remove_attribute(CLAIM_ATTR);
    if let Some(storage) = dom::local_storage() {
        let _ = storage.remove_item(key);
    }
}

fn opacity(id: &str) -> String {
    dom::document()
        .and_then(|doc| doc.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .and_then(|el| el.style().get_property_value("opacity").ok())
        .unwrap_or_default()
}

fn click(id: &str) {
    dom::document()
        .and_then(|doc| doc.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .expect("trigger exists")
        .click();
}

#[wasm_bindgen_test]
fn mount_injects_widget_and_clicks_persist() {
    reset_page("siteStyle");
    let shared = boot::mount(ToggleConfig::style_switcher()).expect("mount");
    let doc = dom::document().expect("document");
    assert!(doc.query_selector(".style-switcher").unwrap().is_some());
    assert_eq!(opacity("standard-style"), "1");
    assert_eq!(opacity("accessibility-style"), "0.6");

    click("accessibility-style");
    assert_eq!(shared.borrow().mode(), Mode::Accessibility);
    assert!(doc.body().unwrap().class_list().contains(ROOT));
    let stored = dom::local_storage().unwrap().get_item("siteStyle").unwrap();
    assert_eq!(stored.as_deref(), Some("accessibility"));
    assert_eq!(opacity("standard-style"), "0.6");
}

#[wasm_bindgen_test]
fn page_buttons_skip_missing_markup() {
    reset_page("accessibilityMode");
    let doc = dom::document().expect("document");
    let button = doc.create_element("button").unwrap();
    button.set_id("accessibility-style");
    doc.body().unwrap().append_child(&button).unwrap();

    let shared = boot::mount(ToggleConfig::page_buttons()).expect("mount");
    assert_eq!(shared.borrow().bound_ids().collect::<Vec<_>>(), ["accessibility-style"]);
    assert!(doc.query_selector(".style-switcher").unwrap().is_none());

    click("accessibility-style");
    let stored = dom::local_storage().unwrap().get_item("accessibilityMode").unwrap();
    assert_eq!(stored.as_deref(), Some("enabled"));
}

#[wasm_bindgen_test]
fn apply_is_idempotent_on_document_element() {
    let doc = dom::document().expect("document");
    let page = DomPage::new(doc.clone(), RootTarget::DocumentElement);
    let html = doc.document_element().unwrap();
    let before = html.class_list().length();
    page.set_root_class(ROOT, true).unwrap();
    page.set_root_class(ROOT, true).unwrap();
    assert_eq!(html.class_list().length(), before + 1);
    page.set_root_class(ROOT, false).unwrap();
    assert!(!page.has_root_class(ROOT));
}

#[wasm_bindgen_test]
fn startup_waits_for_dom_content_loaded() {
    reset_page("siteStyle");
    let doc = dom::document().expect("document");
    let controller = boot::controller(ToggleConfig::style_switcher()).expect("controller");
    let shared = Rc::new(RefCell::new(controller));

    boot::run_when_ready(&shared, DocumentReadyState::Loading);
    assert!(doc.query_selector(".style-switcher").unwrap().is_none());
    assert_eq!(shared.borrow().bound_ids().count(), 0);

    doc.dispatch_event(&Event::new("DOMContentLoaded").unwrap())
        .unwrap();
    assert!(doc.query_selector(".style-switcher").unwrap().is_some());
    click("accessibility-style");
    assert_eq!(shared.borrow().mode(), Mode::Accessibility);
}

#[wasm_bindgen_test]
fn early_apply_then_mount_leaves_one_marked_root() {
    reset_page("siteStyle");
    dom::local_storage()
        .unwrap()
        .set_item("siteStyle", "accessibility")
        .unwrap();
    let doc = dom::document().expect("document");
    let html = doc.document_element().unwrap();
    let body = doc.body().unwrap();

    let head_config = ToggleConfig {
        root_target: RootTarget::DocumentElement,
        ..ToggleConfig::style_switcher()
    };
    boot::apply_saved_mode(head_config).expect("early apply");
    assert!(html.class_list().contains(ROOT));

    let shared = boot::mount(ToggleConfig::style_switcher()).expect("mount");
    assert_eq!(shared.borrow().mode(), Mode::Accessibility);
    assert!(body.class_list().contains(ROOT));
    assert!(!html.class_list().contains(ROOT));

    click("standard-style");
    assert!(!body.class_list().contains(ROOT));
    assert!(!html.class_list().contains(ROOT));
    let stored = dom::local_storage().unwrap().get_item("siteStyle").unwrap();
    assert_eq!(stored.as_deref(), Some("standard"));
}

#[wasm_bindgen_test]
fn second_mount_on_same_root_is_refused() {
    reset_page("siteStyle");
    let _first = boot::mount(ToggleConfig::style_switcher()).expect("first mount");
    let flip_only = ToggleConfig::from_json(
        r#"{ "encoding": "accessibility_mode", "triggers": [{ "id": "a11y-toggle" }] }"#,
    )
    .unwrap();
    assert!(matches!(
        boot::mount(flip_only),
        Err(BootError::AlreadyMounted { class }) if class == ROOT
    ));
    let doc = dom::document().expect("document");
    assert_eq!(doc.query_selector_all(".style-switcher").unwrap().length(), 1);
}
