//! Runtime configuration for the table widget.
//!
//! [`WidgetConfig`] is the single place every tunable lives: the element tag,
//! fallback texts, the bound property name, namespace prefixes for the data
//! adapter, click feedback and the column discovery policy. Defaults reproduce
//! the stock widget exactly, so most hosts only ever use
//! `WidgetConfig::default()`.
//!
//! # Examples
//!
//! ```rust
//! use rtl_table::{ColumnDiscovery, WidgetConfig};
//!
//! let config = WidgetConfig::from_json(r#"{"column_discovery": "all_records"}"#).unwrap();
//! assert_eq!(config.column_discovery, ColumnDiscovery::AllRecords);
//! assert_eq!(config.binding_property, "myBinding");
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Title shown when none (or an empty one) is set.
pub const DEFAULT_TITLE: &str = "טבלת נתוני SAP";

/// Hebrew half of the empty-table message.
pub const PLACEHOLDER_HE: &str = "יש לגרור נתונים מהבונה לטבלה";

/// English half of the empty-table message.
pub const PLACEHOLDER_EN: &str = "Drag data from Builder to the table";

/// Custom element tag the widget registers under by default.
pub const DEFAULT_TAG: &str = "dynamic-rtl-table";

/// How the renderer decides which columns to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnDiscovery {
    /// Columns are the keys of the first record. Keys that only appear in
    /// later records are not shown.
    #[default]
    FirstRecord,
    /// Columns are the ordered union of keys over every record.
    AllRecords,
}

/// Visual feedback applied to a clicked row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// CSS background color while highlighted.
    pub color: String,
    /// Milliseconds before the highlight is removed.
    pub revert_after_ms: u64,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            color: "#d4edda".to_string(),
            revert_after_ms: 200,
        }
    }
}

impl HighlightConfig {
    /// Delay before reverting, as a [`Duration`].
    #[must_use]
    pub fn revert_after(&self) -> Duration {
        Duration::from_millis(self.revert_after_ms)
    }
}

/// Runtime configuration for one widget type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Custom element tag name.
    pub tag_name: String,
    /// Title used when the title property is empty.
    pub default_title: String,
    /// First line of the empty-table message.
    pub placeholder_primary: String,
    /// Second line of the empty-table message.
    pub placeholder_secondary: String,
    /// Name of the changed property that carries a data binding.
    pub binding_property: String,
    /// Field prefix marking dimension descriptors.
    pub dimension_prefix: String,
    /// Field prefix marking measure descriptors.
    pub measure_prefix: String,
    /// Row click feedback.
    pub highlight: HighlightConfig,
    /// Column discovery policy.
    pub column_discovery: ColumnDiscovery,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            tag_name: DEFAULT_TAG.to_string(),
            default_title: DEFAULT_TITLE.to_string(),
            placeholder_primary: PLACEHOLDER_HE.to_string(),
            placeholder_secondary: PLACEHOLDER_EN.to_string(),
            binding_property: "myBinding".to_string(),
            dimension_prefix: "dimensions_".to_string(),
            measure_prefix: "measures_".to_string(),
            highlight: HighlightConfig::default(),
            column_discovery: ColumnDiscovery::default(),
        }
    }
}

impl WidgetConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Set the tag name (builder pattern).
    #[must_use]
    pub fn with_tag_name(mut self, tag: impl Into<String>) -> Self {
        self.tag_name = tag.into();
        self
    }

    /// Set the column discovery policy (builder pattern).
    #[must_use]
    pub fn with_column_discovery(mut self, policy: ColumnDiscovery) -> Self {
        self.column_discovery = policy;
        self
    }
}
