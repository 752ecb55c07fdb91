//! Data adapter: flattens a dimension/measure data binding into records.
//!
//! The hosting environment delivers bound data as rows whose fields are
//! namespaced descriptors:
//!
//! ```json
//! { "data": [
//!     { "dimensions_0": { "id": "REG", "label": "Region", "description": "West" },
//!       "measures_0":   { "label": "Sales", "raw": 100, "formatted": "100" } }
//! ] }
//! ```
//!
//! Each descriptor becomes one column. Dimensions are resolved first, then
//! measures, which fixes the resulting column order.
//!
//! | field     | column key            | display value                      |
//! |-----------|-----------------------|------------------------------------|
//! | dimension | label, id, raw key    | description, label, id             |
//! | measure   | label, id, raw key    | formatted, raw, value              |
//!
//! Each alternative is taken only when it is truthy in the script sense: an
//! absent field, `null`, `false`, `0` and `""` all fall through.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::WidgetConfig;
use crate::record::{Record, format_number};

/// One raw row of a data binding: namespaced key to descriptor.
pub type RawRow = Map<String, Value>;

/// External data binding payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataBinding {
    /// Raw rows in result set order.
    #[serde(default)]
    pub data: Vec<RawRow>,
}

impl DataBinding {
    /// Lenient conversion from an arbitrary JSON value.
    ///
    /// Returns `None` when there is no `data` array. Rows that are not
    /// objects become empty rows.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let rows = value.get("data")?.as_array()?;
        let data = rows
            .iter()
            .map(|row| row.as_object().cloned().unwrap_or_default())
            .collect();
        Some(Self { data })
    }
}

/// A dimension or measure descriptor.
///
/// Every field is optional and may hold any JSON scalar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub label: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub formatted: Option<Value>,
    #[serde(default)]
    pub raw: Option<Value>,
    #[serde(default)]
    pub value: Option<Value>,
}

impl Descriptor {
    /// Reads a descriptor out of a row field. Anything that is not an object
    /// yields an empty descriptor.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value.clone()).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    fn column_key(&self, raw_key: &str) -> String {
        first_truthy(&[&self.label, &self.id]).unwrap_or_else(|| raw_key.to_string())
    }

    /// Column key and display value for a dimension field.
    #[must_use]
    pub fn dimension_entry(&self, raw_key: &str) -> (String, String) {
        let value = first_truthy(&[&self.description, &self.label, &self.id]);
        (self.column_key(raw_key), value.unwrap_or_default())
    }

    /// Column key and display value for a measure field.
    #[must_use]
    pub fn measure_entry(&self, raw_key: &str) -> (String, String) {
        let value = first_truthy(&[&self.formatted, &self.raw, &self.value]);
        (self.column_key(raw_key), value.unwrap_or_default())
    }
}

/// Returns the display text of the first truthy alternative.
fn first_truthy(candidates: &[&Option<Value>]) -> Option<String> {
    candidates
        .iter()
        .copied()
        .find_map(|v| v.as_ref().and_then(truthy_text))
}

/// Text of `value` if it is truthy, `None` otherwise.
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 0.0 || f.is_nan() => None,
            _ => Some(format_number(n)),
        },
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Flattens data bindings into records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataAdapter {
    dimension_prefix: String,
    measure_prefix: String,
}

impl Default for DataAdapter {
    fn default() -> Self {
        Self::from_config(&WidgetConfig::default())
    }
}

impl DataAdapter {
    /// Creates an adapter with explicit namespace prefixes.
    #[must_use]
    pub fn new(dimension_prefix: impl Into<String>, measure_prefix: impl Into<String>) -> Self {
        Self {
            dimension_prefix: dimension_prefix.into(),
            measure_prefix: measure_prefix.into(),
        }
    }

    /// Creates an adapter using the prefixes from `config`.
    #[must_use]
    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(&config.dimension_prefix, &config.measure_prefix)
    }

    /// Flattens one raw row.
    #[must_use]
    pub fn adapt_row(&self, row: &RawRow) -> Record {
        let mut record = Record::new();

        for (key, field) in row {
            if key.starts_with(&self.dimension_prefix) {
                let (column, value) = Descriptor::from_value(field).dimension_entry(key);
                record.insert(column, value);
            }
        }
        for (key, field) in row {
            if key.starts_with(&self.measure_prefix) {
                let (column, value) = Descriptor::from_value(field).measure_entry(key);
                record.insert(column, value);
            }
        }

        record
    }

    /// Flattens every row of a typed binding, in order.
    #[must_use]
    pub fn adapt(&self, binding: &DataBinding) -> Vec<Record> {
        let records: Vec<Record> = binding.data.iter().map(|row| self.adapt_row(row)).collect();
        debug!(rows = records.len(), "adapted data binding");
        records
    }

    /// Flattens a raw JSON binding. An absent binding or one without a `data`
    /// array yields no records.
    #[must_use]
    pub fn adapt_value(&self, binding: Option<&Value>) -> Vec<Record> {
        match binding.and_then(DataBinding::from_value) {
            Some(binding) => self.adapt(&binding),
            None => {
                debug!("data binding has no data payload");
                Vec::new()
            }
        }
    }
}

/// Flattens a raw JSON binding with the default prefixes.
#[must_use]
pub fn adapt(binding: Option<&Value>) -> Vec<Record> {
    DataAdapter::default().adapt_value(binding)
}
