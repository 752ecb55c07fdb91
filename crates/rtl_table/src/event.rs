//! Interaction events emitted by the widget.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::HighlightConfig;
use crate::record::Record;

/// Name under which row clicks are dispatched to the host.
pub const ROW_CLICK_EVENT: &str = "onRowClick";

/// Payload of a click on a body cell.
///
/// Serializes as `{"rowIndex": .., "rowData": {..}, "cellValue": ".."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowClickEvent {
    /// Zero-based index of the clicked row among body rows.
    pub row_index: usize,
    /// The full record behind the row.
    pub row_data: Record,
    /// Text of the clicked cell.
    pub cell_value: String,
}

impl RowClickEvent {
    /// Event name, for hosts that dispatch by name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        ROW_CLICK_EVENT
    }

    /// Event payload as JSON text.
    #[must_use]
    pub fn to_json(&self) -> String {
        // Record and primitive fields only; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Temporary background applied to a clicked row.
///
/// Purely cosmetic: a re-render before `revert_after` elapses replaces the
/// row, and reverting the detached row is harmless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    /// Row to highlight.
    pub row_index: usize,
    /// CSS background color.
    pub color: String,
    /// Delay before the background is cleared.
    pub revert_after: Duration,
}

impl Highlight {
    pub(crate) fn for_row(row_index: usize, config: &HighlightConfig) -> Self {
        Self {
            row_index,
            color: config.color.clone(),
            revert_after: config.revert_after(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_click_serializes_camel_case() {
        let event = RowClickEvent {
            row_index: 0,
            row_data: Record::from_iter([("a", "x")]),
            cell_value: "x".to_string(),
        };

        assert_eq!(
            event.to_json(),
            r#"{"rowIndex":0,"rowData":{"a":"x"},"cellValue":"x"}"#
        );
        assert_eq!(event.name(), "onRowClick");
    }

    #[test]
    fn highlight_uses_config() {
        let h = Highlight::for_row(3, &HighlightConfig::default());
        assert_eq!(h.row_index, 3);
        assert_eq!(h.color, "#d4edda");
        assert_eq!(h.revert_after, Duration::from_millis(200));
    }
}
