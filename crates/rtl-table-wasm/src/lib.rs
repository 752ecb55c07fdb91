//! # rtl-table-wasm
//!
//! The right-to-left table widget for the browser, compiled to WebAssembly.
//!
//! This crate mounts [`rtl_table`]'s widget in a host element's shadow root,
//! forwards the hosting environment's lifecycle callbacks, and dispatches
//! `onRowClick` events on the host.
//!
//! ## Quick Start (JavaScript)
//!
//! ```javascript
//! import init, { WidgetRegistry } from 'rtl-table-wasm';
//!
//! await init();
//! const registry = new WidgetRegistry();
//! registry.define("dynamic-rtl-table");
//!
//! customElements.define("dynamic-rtl-table", class extends HTMLElement {
//!     constructor() {
//!         super();
//!         this._table = registry.create("dynamic-rtl-table", this);
//!     }
//!     connectedCallback() { this._table.connectedCallback(); }
//!     onCustomWidgetBeforeUpdate(changed) { this._table.onCustomWidgetBeforeUpdate(changed); }
//!     onCustomWidgetAfterUpdate(changed) {
//!         if ("tableTitle" in changed) this._table.tableTitle = changed.tableTitle;
//!         this._table.onCustomWidgetAfterUpdate(changed);
//!     }
//!     setTableData(data) { this._table.setTableData(data); }
//!     getTableData() { return this._table.getTableData(); }
//! });
//! ```
//!
//! ## Available APIs
//!
//! - `WidgetRegistry` - explicit tag registration, widget creation, manifests
//! - `DynamicRtlTable` - a mounted widget: lifecycle callbacks, `tableTitle`,
//!   `setTableData(data)`, `getTableData()`
//! - `version()` / `isReady()` - module information

#![forbid(unsafe_code)]

// Use wee_alloc for smaller binaries (optional)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

use tracing_subscriber::filter::LevelFilter;
use wasm_bindgen::prelude::*;

pub mod logging;
pub mod registry;
pub mod surface;
pub mod widget;

pub use registry::JsRegistry;
pub use surface::ShadowSurface;
pub use widget::JsDynamicTable;

/// Sets up panic reporting and console logging.
///
/// Runs automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(LevelFilter::INFO);
}

/// Module version information.
#[must_use]
#[wasm_bindgen(js_name = "version")]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Check if the module is properly initialized.
#[must_use]
#[wasm_bindgen(js_name = "isReady")]
#[allow(clippy::missing_const_for_fn)] // wasm_bindgen doesn't support const fn
pub fn is_ready() -> bool {
    true
}
