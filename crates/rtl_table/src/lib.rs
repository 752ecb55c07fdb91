#![forbid(unsafe_code)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::float_cmp)]

//! # rtl_table
//!
//! A right-to-left data table widget that can be embedded in a page.
//!
//! The crate is host-neutral. It provides:
//! - **Records**: ordered column name to display value mappings
//! - **Data adapter**: flattens dimension/measure data bindings into records
//! - **Renderer**: builds the widget's element tree, HTML and scoped stylesheet
//! - **Widget**: title and row state, lifecycle hooks, row click events
//! - **Registry** and **manifest**: explicit tag registration and the host
//!   manifest describing the widget
//!
//! Browser hosts use the `rtl-table-wasm` crate, which implements
//! [`Surface`] over a shadow root.
//!
//! ## Example
//!
//! ```rust
//! use rtl_table::{DynamicTable, HeadlessSurface};
//! use serde_json::json;
//!
//! let mut table = DynamicTable::new(HeadlessSurface::new());
//! let binding = json!({"data": [{
//!     "dimensions_0": {"label": "Region", "description": "West"},
//!     "measures_0": {"label": "Sales", "formatted": "100"}
//! }]});
//! table.apply_binding(Some(&binding));
//!
//! let view = table.view().unwrap();
//! assert_eq!(view.columns(), ["Region", "Sales"]);
//! assert_eq!(view.body_rows().count(), 1);
//! ```

pub mod binding;
pub mod config;
pub mod error;
pub mod event;
pub mod manifest;
pub mod record;
pub mod registry;
pub mod render;
pub mod surface;
pub mod widget;

pub use binding::{DataAdapter, DataBinding, Descriptor, adapt};
pub use config::{ColumnDiscovery, HighlightConfig, WidgetConfig};
pub use error::{Error, Result};
pub use event::{Highlight, ROW_CLICK_EVENT, RowClickEvent};
pub use manifest::WidgetManifest;
pub use record::{Record, TableState};
pub use registry::ComponentRegistry;
pub use render::{Element, Node, RenderOptions, STYLESHEET, TableView, render, render_with};
pub use surface::{HeadlessSurface, Surface};
pub use widget::{DynamicTable, TableInput, parse_rows};
