//! Integration tests driving the widget the way a hosting page does.

#![forbid(unsafe_code)]

use rtl_table::config::DEFAULT_TITLE;
use rtl_table::{
    ColumnDiscovery, ComponentRegistry, Element, HeadlessSurface, Record, WidgetConfig,
    WidgetManifest,
};
use serde_json::{Map, Value, json};

fn changed(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

fn body_text(view: &rtl_table::TableView) -> Vec<Vec<String>> {
    view.body_rows()
        .map(|tr| tr.child_elements().map(Element::text_content).collect())
        .collect()
}

// ============================================================================
// Scenario 1: Host lifecycle with a data binding
// ============================================================================

#[test]
fn binding_update_renders_adapted_rows() {
    let mut registry = ComponentRegistry::new();
    registry.define(WidgetConfig::default()).unwrap();
    let mut table = registry
        .create("dynamic-rtl-table", HeadlessSurface::new())
        .unwrap();

    table.connected();
    assert!(table.view().unwrap().is_placeholder());

    let props = changed(json!({
        "tableTitle": "מכירות",
        "myBinding": {"data": [
            {"dimensions_0": {"id": "R1", "label": "Region", "description": "West"},
             "measures_0": {"id": "S", "label": "Sales", "raw": 100, "formatted": "100"}},
            {"dimensions_0": {"id": "R2", "label": "Region", "description": "East"},
             "measures_0": {"id": "S", "label": "Sales", "raw": 250.5}}
        ]}
    }));
    table.on_before_update(&props);
    table.set_title(props["tableTitle"].as_str().unwrap_or_default());
    table.on_after_update(&props);

    let view = table.view().unwrap();
    assert_eq!(view.title(), "מכירות");
    assert_eq!(view.columns(), ["Region", "Sales"]);
    assert_eq!(body_text(view), [vec!["West", "100"], vec!["East", "250.5"]]);
    assert_eq!(table.surface().present_calls(), 3);
}

// ============================================================================
// Scenario 2: Script-driven data and clicks
// ============================================================================

#[test]
fn set_data_then_click_second_row() {
    let mut table = rtl_table::DynamicTable::new(HeadlessSurface::new());
    table.set_table_data(r#"[{"שם":"דנה","עיר":"חיפה"},{"שם":"יואב","עיר":"אילת"}]"#);

    let highlight = table.click(1, 1).unwrap();
    assert_eq!(highlight.row_index, 1);
    assert_eq!(highlight.color, "#d4edda");

    let events = table.surface().events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].cell_value, "אילת");
    assert_eq!(
        events[0].row_data,
        Record::from_iter([("שם", "יואב"), ("עיר", "אילת")])
    );
    assert_eq!(
        events[0].to_json(),
        r#"{"rowIndex":1,"rowData":{"שם":"יואב","עיר":"אילת"},"cellValue":"אילת"}"#
    );
}

#[test]
fn stale_click_after_rerender_is_ignored() {
    let mut table = rtl_table::DynamicTable::new(HeadlessSurface::new());
    table.set_table_data(r#"[{"a":"1"},{"a":"2"},{"a":"3"}]"#);
    table.set_table_data(r#"[{"a":"1"}]"#);

    assert!(table.click_cell(Some(2), "3").is_none());
    assert!(table.surface().events().is_empty());
}

#[test]
fn binding_without_prefixed_fields_has_nothing_to_click() {
    let mut table = rtl_table::DynamicTable::new(HeadlessSurface::new());
    table.apply_binding(Some(&json!({"data": [{"other": {"label": "x"}}]})));

    let view = table.view().unwrap();
    assert!(!view.is_placeholder());
    assert_eq!(view.body_rows().count(), 1);
    assert!(!view.to_html().contains("no-data"));

    assert!(table.click(0, 0).is_none());
    assert!(table.surface().events().is_empty());
}

#[test]
fn get_table_data_returns_what_was_set() {
    let mut table = rtl_table::DynamicTable::new(HeadlessSurface::new());
    let rows = vec![Record::from_iter([("k", "v")])];
    table.set_table_data(rows.clone());
    assert_eq!(table.table_data(), rows.as_slice());
    assert_eq!(table.state().rows, rows);
}

#[test]
fn not_json_shows_placeholder() {
    let mut table = rtl_table::DynamicTable::new(HeadlessSurface::new());
    table.set_table_data("not json");

    assert!(table.table_data().is_empty());
    let html = table.view().unwrap().to_html();
    assert!(html.contains("class=\"no-data\""));
    assert!(html.contains("Drag data from Builder to the table"));
    assert_eq!(table.title(), DEFAULT_TITLE);
}

// ============================================================================
// Scenario 3: Configuration
// ============================================================================

#[test]
fn configured_widget_uses_all_columns_and_custom_binding() {
    let config = WidgetConfig::from_json(
        r#"{
            "tag_name": "kpi-table",
            "binding_property": "kpis",
            "column_discovery": "all_records",
            "placeholder_secondary": "No data"
        }"#,
    )
    .unwrap();
    assert_eq!(config.column_discovery, ColumnDiscovery::AllRecords);

    let mut registry = ComponentRegistry::new();
    registry.define(config).unwrap();
    let mut table = registry.create("kpi-table", HeadlessSurface::new()).unwrap();

    table.connected();
    assert!(table.view().unwrap().to_html().contains("No data"));

    table.on_before_update(&changed(json!({"kpis": {"data": [
        {"dimensions_0": {"label": "A", "description": "a"}},
        {"measures_0": {"label": "B", "formatted": "b"}}
    ]}})));

    let view = table.view().unwrap();
    assert_eq!(view.columns(), ["A", "B"]);
    assert_eq!(body_text(view), [vec!["a", ""], vec!["", "b"]]);
}

#[test]
fn manifest_matches_registered_config() {
    let config = WidgetConfig::default().with_tag_name("sales-grid");
    let manifest = WidgetManifest::from_config(&config, "https://cdn.example.com/sales-grid.js");

    assert_eq!(manifest.webcomponents[0].tag, "sales-grid");
    assert_eq!(manifest.new_instance_prefix, "SalesGrid");
    assert_eq!(manifest.properties["tableTitle"].default, DEFAULT_TITLE);
}
