//! The table widget: state, lifecycle hooks and public methods.
//!
//! [`DynamicTable`] owns the title and rows and re-renders onto its
//! [`Surface`] whenever they change. All mutation happens through `&mut self`
//! from the host's own callbacks; nothing here is shared or asynchronous.
//!
//! # Example
//!
//! ```rust
//! use rtl_table::{DynamicTable, HeadlessSurface};
//!
//! let mut table = DynamicTable::new(HeadlessSurface::new());
//! table.set_table_data(r#"[{"a":"x"}]"#);
//!
//! table.click(0, 0);
//! let event = &table.surface().events()[0];
//! assert_eq!(event.row_index, 0);
//! assert_eq!(event.cell_value, "x");
//! ```

use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::binding::DataAdapter;
use crate::config::WidgetConfig;
use crate::error::{Error, Result};
use crate::event::{Highlight, RowClickEvent};
use crate::record::{Record, TableState};
use crate::render::{Placeholder, RenderOptions, TableView, render_with};
use crate::surface::Surface;

/// Input accepted by [`DynamicTable::set_table_data`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableInput {
    /// JSON text encoding a sequence of records.
    Json(String),
    /// Records used as they are.
    Rows(Vec<Record>),
    /// Anything else; treated as no data.
    Other,
}

impl From<&str> for TableInput {
    fn from(text: &str) -> Self {
        Self::Json(text.to_string())
    }
}

impl From<String> for TableInput {
    fn from(text: String) -> Self {
        Self::Json(text)
    }
}

impl From<Vec<Record>> for TableInput {
    fn from(rows: Vec<Record>) -> Self {
        Self::Rows(rows)
    }
}

impl From<Value> for TableInput {
    /// Strings are JSON text, arrays are records, everything else is no data.
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Json(text),
            value @ Value::Array(_) => match serde_json::from_value(value) {
                Ok(rows) => Self::Rows(rows),
                Err(err) => {
                    error!(%err, "table data array is not a sequence of records");
                    Self::Other
                }
            },
            _ => Self::Other,
        }
    }
}

/// Parses JSON text into a sequence of records.
pub fn parse_rows(text: &str) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        Value::Null => Err(Error::NotASequence("null")),
        Value::Bool(_) => Err(Error::NotASequence("a boolean")),
        Value::Number(_) => Err(Error::NotASequence("a number")),
        Value::String(_) => Err(Error::NotASequence("a string")),
        Value::Object(_) => Err(Error::NotASequence("an object")),
    }
}

/// A table widget bound to a display surface.
#[derive(Debug)]
pub struct DynamicTable<S: Surface> {
    config: WidgetConfig,
    adapter: DataAdapter,
    state: TableState,
    view: Option<TableView>,
    surface: S,
}

impl<S: Surface> DynamicTable<S> {
    /// Creates a widget with the default configuration.
    pub fn new(surface: S) -> Self {
        Self::with_config(WidgetConfig::default(), surface)
    }

    /// Creates a widget with `config`.
    pub fn with_config(config: WidgetConfig, surface: S) -> Self {
        let adapter = DataAdapter::from_config(&config);
        let state = TableState {
            title: config.default_title.clone(),
            rows: Vec::new(),
        };
        Self {
            config,
            adapter,
            state,
            view: None,
            surface,
        }
    }

    /// The widget's configuration.
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// The display surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the display surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consumes the widget, returning its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Current title.
    pub fn title(&self) -> &str {
        &self.state.title
    }

    /// Sets the title. An empty value restores the default title.
    ///
    /// Takes effect on the next render.
    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        self.state.title = if title.is_empty() {
            self.config.default_title.clone()
        } else {
            title
        };
    }

    /// Current rows, in display order.
    pub fn table_data(&self) -> &[Record] {
        &self.state.rows
    }

    /// Snapshot of title and rows.
    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// The last rendered view, if any.
    pub fn view(&self) -> Option<&TableView> {
        self.view.as_ref()
    }

    /// Replaces the rows and re-renders.
    ///
    /// JSON that fails to parse, or that is not a sequence of records, is
    /// logged and results in an empty table. Never fails.
    pub fn set_table_data(&mut self, input: impl Into<TableInput>) {
        self.state.rows = match input.into() {
            TableInput::Json(text) => parse_rows(&text).unwrap_or_else(|err| {
                error!(%err, "error setting table data");
                Vec::new()
            }),
            TableInput::Rows(rows) => rows,
            TableInput::Other => Vec::new(),
        };
        self.render();
    }

    /// Called when the widget is attached to the page.
    pub fn connected(&mut self) {
        self.render();
    }

    /// Called before the host applies changed properties.
    ///
    /// When the bound property is among them its binding is adapted into the
    /// rows, which also re-renders.
    pub fn on_before_update(&mut self, changed: &Map<String, Value>) {
        if let Some(binding) = changed.get(&self.config.binding_property) {
            self.apply_binding(Some(binding));
        }
    }

    /// Called after the host applied changed properties. Always re-renders.
    pub fn on_after_update(&mut self, _changed: &Map<String, Value>) {
        self.render();
    }

    /// Replaces the rows with the flattened `binding` and re-renders.
    pub fn apply_binding(&mut self, binding: Option<&Value>) {
        self.state.rows = self.adapter.adapt_value(binding);
        self.render();
    }

    /// Rebuilds the view from the current state and presents it.
    pub fn render(&mut self) -> &TableView {
        let options = RenderOptions {
            columns: self.config.column_discovery,
            placeholder: Placeholder {
                primary: self.config.placeholder_primary.clone(),
                secondary: self.config.placeholder_secondary.clone(),
            },
        };
        let view = render_with(&self.state.title, &self.state.rows, &options);
        self.surface.present(&view);
        self.view.insert(view)
    }

    /// Handles activation of a body cell.
    ///
    /// `row_index` is the position of the cell's row among rendered body rows,
    /// or `None` when the host could not resolve it. When it maps to a current
    /// record a [`RowClickEvent`] is emitted and the highlight to apply is
    /// returned; otherwise nothing happens.
    pub fn click_cell(&mut self, row_index: Option<usize>, cell_value: &str) -> Option<Highlight> {
        let Some((index, record)) = row_index.and_then(|i| Some((i, self.state.rows.get(i)?)))
        else {
            debug!(?row_index, "click did not resolve to a row");
            return None;
        };

        let event = RowClickEvent {
            row_index: index,
            row_data: record.clone(),
            cell_value: cell_value.to_string(),
        };
        self.surface.emit(&event);
        Some(Highlight::for_row(index, &self.config.highlight))
    }

    /// Clicks the cell at `row`/`column` of the last rendered view.
    ///
    /// Convenience for hosts without their own hit testing.
    pub fn click(&mut self, row: usize, column: usize) -> Option<Highlight> {
        let cell_value = self
            .view
            .as_ref()?
            .body_rows()
            .nth(row)?
            .child_elements()
            .nth(column)?
            .text_content();
        self.click_cell(Some(row), &cell_value)
    }
}
