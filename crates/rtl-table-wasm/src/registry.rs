//! Script-facing component registry.

use rtl_table::{ComponentRegistry, WidgetConfig, WidgetManifest};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::widget::JsDynamicTable;

/// Registry the page creates once at startup.
///
/// ```javascript
/// const registry = new WidgetRegistry();
/// registry.define("dynamic-rtl-table");
/// const table = registry.create("dynamic-rtl-table", hostElement);
/// ```
#[wasm_bindgen(js_name = "WidgetRegistry")]
#[derive(Default)]
pub struct JsRegistry {
    inner: ComponentRegistry,
}

#[wasm_bindgen(js_class = "WidgetRegistry")]
impl JsRegistry {
    /// Creates an empty registry.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines `tag` with the default configuration, or with `config_json`
    /// layered over the defaults.
    pub fn define(&mut self, tag: &str, config_json: Option<String>) -> Result<(), JsError> {
        let config = match config_json {
            Some(text) => WidgetConfig::from_json(&text)?,
            None => WidgetConfig::default(),
        };
        self.inner.define(config.with_tag_name(tag))?;
        Ok(())
    }

    /// Whether `tag` has been defined.
    #[wasm_bindgen(js_name = "isDefined")]
    pub fn is_defined(&self, tag: &str) -> bool {
        self.inner.is_defined(tag)
    }

    /// Mounts a widget of type `tag` in `host`.
    pub fn create(&self, tag: &str, host: HtmlElement) -> Result<JsDynamicTable, JsError> {
        let config = self
            .inner
            .get(tag)
            .cloned()
            .ok_or_else(|| rtl_table::Error::UnknownTag(tag.to_string()))?;
        JsDynamicTable::mount(host, config)
    }

    /// Manifest JSON for `tag`, with the defining script served from `url`.
    pub fn manifest(&self, tag: &str, url: &str) -> Result<String, JsError> {
        let config = self
            .inner
            .get(tag)
            .ok_or_else(|| rtl_table::Error::UnknownTag(tag.to_string()))?;
        Ok(WidgetManifest::from_config(config, url).to_json_pretty())
    }
}
