//! The seam between the widget and whatever displays it.
//!
//! A browser host implements [`Surface`] over a shadow root; tests and
//! server-side renderers use [`HeadlessSurface`], which simply records what it
//! was given.

use crate::event::RowClickEvent;
use crate::render::TableView;

/// Receives rendered views and emitted events.
pub trait Surface {
    /// Replaces whatever was displayed with `view`.
    fn present(&mut self, view: &TableView);

    /// Delivers an interaction event to the host's listeners.
    fn emit(&mut self, event: &RowClickEvent);
}

/// A surface that keeps the last view and every emitted event.
///
/// # Example
///
/// ```rust
/// use rtl_table::{DynamicTable, HeadlessSurface};
///
/// let mut table = DynamicTable::new(HeadlessSurface::new());
/// table.connected();
///
/// assert_eq!(table.surface().present_calls(), 1);
/// assert!(table.surface().last_view().unwrap().is_placeholder());
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    last_view: Option<TableView>,
    present_calls: usize,
    events: Vec<RowClickEvent>,
}

impl HeadlessSurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently presented view.
    #[must_use]
    pub fn last_view(&self) -> Option<&TableView> {
        self.last_view.as_ref()
    }

    /// How many times a view was presented.
    #[must_use]
    pub fn present_calls(&self) -> usize {
        self.present_calls
    }

    /// Events emitted so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[RowClickEvent] {
        &self.events
    }

    /// Removes and returns the emitted events.
    pub fn take_events(&mut self) -> Vec<RowClickEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Surface for HeadlessSurface {
    fn present(&mut self, view: &TableView) {
        self.present_calls += 1;
        self.last_view = Some(view.clone());
    }

    fn emit(&mut self, event: &RowClickEvent) {
        self.events.push(event.clone());
    }
}
