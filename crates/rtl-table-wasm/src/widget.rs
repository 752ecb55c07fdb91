//! The `DynamicRtlTable` class exposed to scripts.

use std::cell::RefCell;
use std::rc::Rc;

use rtl_table::render::BODY_ID;
use rtl_table::{DynamicTable, Highlight, TableInput, WidgetConfig};
use serde_json::{Map, Value};
use tracing::{debug, error};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, MouseEvent};

use crate::surface::{ShadowSurface, row_index};

type SharedTable = Rc<RefCell<DynamicTable<ShadowSurface>>>;

/// A table widget mounted in a host element.
///
/// The host's custom element class forwards its lifecycle callbacks and
/// public methods to this object.
#[wasm_bindgen(js_name = "DynamicRtlTable")]
pub struct JsDynamicTable {
    table: SharedTable,
    host: HtmlElement,
    _on_click: Closure<dyn FnMut(MouseEvent)>,
}

#[wasm_bindgen(js_class = "DynamicRtlTable")]
impl JsDynamicTable {
    /// Mounts a widget with the default configuration in `host`.
    #[wasm_bindgen(constructor)]
    pub fn new(host: HtmlElement) -> Result<JsDynamicTable, JsError> {
        Self::mount(host, WidgetConfig::default())
    }

    /// Called when the element is attached to the page.
    #[wasm_bindgen(js_name = "connectedCallback")]
    pub fn connected_callback(&self) {
        self.table.borrow_mut().connected();
    }

    /// Called by the host before changed properties are applied.
    #[wasm_bindgen(js_name = "onCustomWidgetBeforeUpdate")]
    pub fn on_before_update(&self, changed: JsValue) {
        let changed = changed_properties(&changed);
        self.table.borrow_mut().on_before_update(&changed);
    }

    /// Called by the host after changed properties are applied.
    #[wasm_bindgen(js_name = "onCustomWidgetAfterUpdate")]
    pub fn on_after_update(&self, changed: JsValue) {
        let changed = changed_properties(&changed);
        self.table.borrow_mut().on_after_update(&changed);
    }

    /// Current title.
    #[wasm_bindgen(getter, js_name = "tableTitle")]
    pub fn table_title(&self) -> String {
        self.table.borrow().title().to_string()
    }

    /// Sets the title; empty or missing restores the default.
    #[wasm_bindgen(setter, js_name = "tableTitle")]
    pub fn set_table_title(&self, value: Option<String>) {
        self.table.borrow_mut().set_title(value.unwrap_or_default());
    }

    /// Replaces the rows from a JSON string or an array of records.
    #[wasm_bindgen(js_name = "setTableData")]
    pub fn set_table_data(&self, data: JsValue) {
        let input = table_input(&data);
        self.table.borrow_mut().set_table_data(input);
    }

    /// A copy of the current rows as an array of plain objects.
    #[wasm_bindgen(js_name = "getTableData")]
    pub fn get_table_data(&self) -> JsValue {
        let json = serde_json::to_string(self.table.borrow().table_data()).unwrap_or_default();
        js_sys::JSON::parse(&json).unwrap_or_else(|_| js_sys::Array::new().into())
    }

    /// The element the widget is mounted in.
    #[wasm_bindgen(getter)]
    pub fn host(&self) -> HtmlElement {
        self.host.clone()
    }
}

impl JsDynamicTable {
    /// Mounts a widget configured by `config` in `host` and wires the click
    /// listener on its shadow root.
    pub fn mount(host: HtmlElement, config: WidgetConfig) -> Result<Self, JsError> {
        let surface = ShadowSurface::attach(&host).map_err(js_error)?;
        let shadow = surface.shadow().clone();
        let table: SharedTable = Rc::new(RefCell::new(DynamicTable::with_config(config, surface)));

        let on_click = {
            let table = Rc::clone(&table);
            let host = host.clone();
            Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                handle_click(&table, &host, &event);
            })
        };
        shadow
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(js_error)?;

        Ok(Self {
            table,
            host,
            _on_click: on_click,
        })
    }
}

fn handle_click(table: &SharedTable, host: &HtmlElement, event: &MouseEvent) {
    let Some(cell) = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
    else {
        return;
    };
    if cell.tag_name() != "TD" {
        return;
    }
    let row = cell.parent_element();
    let index = row.as_ref().and_then(|row| {
        let tbody = table
            .borrow()
            .surface()
            .shadow()
            .get_element_by_id(BODY_ID)?;
        row_index(&tbody, row)
    });
    let cell_value = cell.text_content().unwrap_or_default();

    let (highlight, events) = {
        let mut table = table.borrow_mut();
        let highlight = table.click_cell(index, &cell_value);
        (highlight, table.surface_mut().take_pending())
    };

    for event in &events {
        if let Err(err) = ShadowSurface::dispatch(host, event) {
            error!(?err, "failed to dispatch row click");
        }
    }

    if let (Some(highlight), Some(row)) = (highlight, row) {
        apply_highlight(&row, &highlight);
    }
}

/// Tints `row` and clears the tint after the configured delay.
fn apply_highlight(row: &Element, highlight: &Highlight) {
    let Some(row) = row.dyn_ref::<HtmlElement>().cloned() else {
        return;
    };
    if let Err(err) = row
        .style()
        .set_property("background-color", &highlight.color)
    {
        debug!(?err, "could not apply row highlight");
        return;
    }

    let Some(window) = web_sys::window() else {
        return;
    };
    let revert = Closure::once_into_js(move || {
        if let Err(err) = row.style().set_property("background-color", "") {
            debug!(?err, "could not revert row highlight");
        }
    });
    let delay = i32::try_from(highlight.revert_after.as_millis()).unwrap_or(i32::MAX);
    if let Err(err) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(revert.unchecked_ref(), delay)
    {
        debug!(?err, "could not schedule highlight revert");
    }
}

/// Converts the host's changed-properties object to JSON.
fn changed_properties(changed: &JsValue) -> Map<String, Value> {
    js_sys::JSON::stringify(changed)
        .ok()
        .and_then(|text| text.as_string())
        .and_then(|text| serde_json::from_str::<Value>(&text).ok())
        .and_then(|value| match value {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .unwrap_or_default()
}

/// Classifies script input: strings are JSON text, arrays are records,
/// anything else is no data.
fn table_input(data: &JsValue) -> TableInput {
    if let Some(text) = data.as_string() {
        return TableInput::Json(text);
    }
    if !js_sys::Array::is_array(data) {
        return TableInput::Other;
    }
    js_sys::JSON::stringify(data)
        .ok()
        .and_then(|text| text.as_string())
        .and_then(|text| serde_json::from_str::<Value>(&text).ok())
        .map_or(TableInput::Other, TableInput::from)
}

pub(crate) fn js_error(err: JsValue) -> JsError {
    JsError::new(
        &err.as_string()
            .unwrap_or_else(|| format!("{err:?}")),
    )
}
