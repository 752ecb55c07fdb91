//! Browser tests for the mounted widget.
//!
//! Run with: wasm-pack test --headless --chrome

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use rtl_table_wasm::{JsDynamicTable, JsRegistry};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;
use web_sys::{CustomEvent, Document, Element, HtmlElement, ShadowRoot, window};

wasm_bindgen_test_configure!(run_in_browser);

// === Helper Functions ===

fn get_document() -> Document {
    window()
        .expect("no window")
        .document()
        .expect("no document")
}

fn create_host(id: &str) -> HtmlElement {
    let doc = get_document();
    let host = doc
        .create_element("div")
        .expect("create div failed")
        .dyn_into::<HtmlElement>()
        .expect("not an HtmlElement");
    host.set_id(id);
    doc.body()
        .expect("no body")
        .append_child(&host)
        .expect("append failed");
    host
}

fn cleanup(id: &str) {
    if let Some(element) = get_document().get_element_by_id(id) {
        element.remove();
    }
}

fn shadow(host: &HtmlElement) -> ShadowRoot {
    host.shadow_root().expect("no shadow root")
}

fn body_rows(host: &HtmlElement) -> Vec<Element> {
    let tbody = shadow(host)
        .get_element_by_id("tableBody")
        .expect("no tbody");
    let rows = tbody.children();
    (0..rows.length()).filter_map(|i| rows.item(i)).collect()
}

// === Module ===

#[wasm_bindgen_test]
fn test_module_ready() {
    assert!(rtl_table_wasm::is_ready());
    assert!(rtl_table_wasm::version().contains('.'));
}

// === Rendering ===

#[wasm_bindgen_test]
fn test_connected_renders_placeholder() {
    let host = create_host("rtl-placeholder");
    let table = JsDynamicTable::new(host.clone()).expect("mount failed");
    table.connected_callback();

    let rows = body_rows(&host);
    assert_eq!(rows.len(), 1);
    let html = rows[0].inner_html();
    assert!(html.contains("no-data"));
    assert!(html.contains("Drag data from Builder to the table"));

    let style = shadow(&host).first_element_child().expect("no style");
    assert_eq!(style.tag_name(), "STYLE");

    cleanup("rtl-placeholder");
}

#[wasm_bindgen_test]
fn test_set_table_data_renders_rows() {
    let host = create_host("rtl-rows");
    let table = JsDynamicTable::new(host.clone()).expect("mount failed");
    table.set_table_data(JsValue::from_str(r#"[{"a":"1","b":"2"},{"a":"3","b":"4"}]"#));

    assert_eq!(body_rows(&host).len(), 2);
    let head = shadow(&host).get_element_by_id("tableHead").expect("no thead");
    assert_eq!(head.text_content().unwrap_or_default(), "ab");

    let data = table.get_table_data();
    assert!(js_sys::Array::is_array(&data));
    assert_eq!(js_sys::Array::from(&data).length(), 2);

    cleanup("rtl-rows");
}

#[wasm_bindgen_test]
fn test_invalid_json_clears_table() {
    let host = create_host("rtl-invalid");
    let table = JsDynamicTable::new(host.clone()).expect("mount failed");
    table.set_table_data(JsValue::from_str(r#"[{"a":"1"}]"#));
    table.set_table_data(JsValue::from_str("not json"));

    assert_eq!(js_sys::Array::from(&table.get_table_data()).length(), 0);
    assert!(body_rows(&host)[0].inner_html().contains("no-data"));

    cleanup("rtl-invalid");
}

#[wasm_bindgen_test]
fn test_binding_update() {
    let host = create_host("rtl-binding");
    let table = JsDynamicTable::new(host.clone()).expect("mount failed");

    let changed = js_sys::JSON::parse(
        r#"{"myBinding": {"data": [{
            "dimensions_0": {"label": "Region", "description": "West"},
            "measures_0": {"label": "Sales", "formatted": "100"}
        }]}}"#,
    )
    .expect("bad fixture");
    table.on_before_update(changed.clone());
    table.on_after_update(changed);

    let rows = body_rows(&host);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].text_content().unwrap_or_default(), "West100");

    cleanup("rtl-binding");
}

#[wasm_bindgen_test]
fn test_title_property() {
    let host = create_host("rtl-title");
    let table = JsDynamicTable::new(host.clone()).expect("mount failed");

    table.set_table_title(Some("Quarterly".to_string()));
    table.on_after_update(JsValue::from(js_sys::Object::new()));
    let title = shadow(&host).get_element_by_id("title").expect("no title");
    assert_eq!(title.text_content().unwrap_or_default(), "Quarterly");

    table.set_table_title(None);
    assert_eq!(table.table_title(), "טבלת נתוני SAP");

    cleanup("rtl-title");
}

// === Interaction ===

#[wasm_bindgen_test]
fn test_cell_click_dispatches_row_event() {
    let host = create_host("rtl-click");
    let table = JsDynamicTable::new(host.clone()).expect("mount failed");
    table.set_table_data(JsValue::from_str(r#"[{"a":"x"},{"a":"y"}]"#));

    let received: Rc<RefCell<Vec<JsValue>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&received);
    let listener = Closure::<dyn FnMut(CustomEvent)>::new(move |event: CustomEvent| {
        sink.borrow_mut().push(event.detail());
    });
    host.add_event_listener_with_callback("onRowClick", listener.as_ref().unchecked_ref())
        .expect("listen failed");

    let cell = body_rows(&host)[1]
        .first_element_child()
        .expect("no cell")
        .dyn_into::<HtmlElement>()
        .expect("not an HtmlElement");
    cell.click();

    let events = received.borrow();
    assert_eq!(events.len(), 1);
    let detail = js_sys::JSON::stringify(&events[0])
        .expect("stringify failed")
        .as_string()
        .unwrap_or_default();
    assert_eq!(detail, r#"{"rowIndex":1,"rowData":{"a":"y"},"cellValue":"y"}"#);

    let row = body_rows(&host)[1]
        .clone()
        .dyn_into::<HtmlElement>()
        .expect("not an HtmlElement");
    assert!(!row.style().get_property_value("background-color").unwrap_or_default().is_empty());

    cleanup("rtl-click");
}

#[wasm_bindgen_test]
fn test_placeholder_click_is_silent() {
    let host = create_host("rtl-silent");
    let table = JsDynamicTable::new(host.clone()).expect("mount failed");
    table.connected_callback();

    let received = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&received);
    let listener = Closure::<dyn FnMut(CustomEvent)>::new(move |_event: CustomEvent| {
        *sink.borrow_mut() += 1;
    });
    host.add_event_listener_with_callback("onRowClick", listener.as_ref().unchecked_ref())
        .expect("listen failed");

    body_rows(&host)[0]
        .first_element_child()
        .expect("no cell")
        .dyn_into::<HtmlElement>()
        .expect("not an HtmlElement")
        .click();

    assert_eq!(*received.borrow(), 0);
    cleanup("rtl-silent");
}

// === Registry ===

#[wasm_bindgen_test]
fn test_registry_define_and_create() {
    let mut registry = JsRegistry::new();
    registry
        .define("sales-table", Some(r#"{"default_title": "Sales"}"#.to_string()))
        .expect("define failed");
    assert!(registry.is_defined("sales-table"));
    assert!(registry.define("sales-table", None).is_err());
    assert!(registry.define("NoHyphen", None).is_err());

    let host = create_host("rtl-registry");
    let table = registry.create("sales-table", host).expect("create failed");
    assert_eq!(table.table_title(), "Sales");
    assert!(registry.create("other-table", create_host("rtl-other")).is_err());

    let manifest = registry.manifest("sales-table", "/sales.js").expect("manifest failed");
    assert!(manifest.contains("\"tag\": \"sales-table\""));

    cleanup("rtl-registry");
    cleanup("rtl-other");
}
