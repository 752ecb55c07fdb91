//! Shadow DOM surface: materializes rendered views inside a host element.

use rtl_table::render::{Element as ViewElement, Node as ViewNode};
use rtl_table::{RowClickEvent, STYLESHEET, Surface, TableView};
use tracing::error;
use wasm_bindgen::prelude::*;
use web_sys::{
    CustomEvent, CustomEventInit, Document, Element, HtmlElement, Node, ShadowRoot,
    ShadowRootInit, ShadowRootMode,
};

/// Displays the widget in an open shadow root attached to `host`.
///
/// Events are queued by [`Surface::emit`] and dispatched later with
/// [`ShadowSurface::dispatch`], so listeners run once the widget is no longer
/// borrowed and may call back into it.
pub struct ShadowSurface {
    document: Document,
    shadow: ShadowRoot,
    container: Option<Element>,
    pending: Vec<RowClickEvent>,
}

impl ShadowSurface {
    /// Attaches (or reuses) the host's shadow root and installs the scoped
    /// stylesheet.
    pub fn attach(host: &HtmlElement) -> Result<Self, JsValue> {
        let document = host
            .owner_document()
            .ok_or_else(|| JsValue::from_str("host element has no document"))?;

        let shadow = match host.shadow_root() {
            Some(shadow) => {
                shadow.set_inner_html("");
                shadow
            }
            None => host.attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))?,
        };

        let style = document.create_element("style")?;
        style.set_text_content(Some(STYLESHEET));
        shadow.append_child(&style)?;

        Ok(Self {
            document,
            shadow,
            container: None,
            pending: Vec::new(),
        })
    }

    /// The shadow root the table lives in.
    pub fn shadow(&self) -> &ShadowRoot {
        &self.shadow
    }

    /// Removes and returns queued events.
    pub fn take_pending(&mut self) -> Vec<RowClickEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Dispatches `event` on `host` as a `CustomEvent` whose `detail` is the
    /// event payload.
    pub fn dispatch(host: &HtmlElement, event: &RowClickEvent) -> Result<(), JsValue> {
        let detail = js_sys::JSON::parse(&event.to_json())?;
        let init = CustomEventInit::new();
        init.set_detail(&detail);
        let custom = CustomEvent::new_with_event_init_dict(event.name(), &init)?;
        host.dispatch_event(&custom)?;
        Ok(())
    }

    fn replace_container(&mut self, view: &TableView) -> Result<(), JsValue> {
        let fresh = build_element(&self.document, view.root())?;
        match self.container.take() {
            Some(old) => {
                self.shadow.replace_child(&fresh, &old)?;
            }
            None => {
                self.shadow.append_child(&fresh)?;
            }
        }
        self.container = Some(fresh);
        Ok(())
    }
}

impl Surface for ShadowSurface {
    fn present(&mut self, view: &TableView) {
        if let Err(err) = self.replace_container(view) {
            error!(?err, "failed to update shadow DOM");
        }
    }

    fn emit(&mut self, event: &RowClickEvent) {
        self.pending.push(event.clone());
    }
}

fn build_element(document: &Document, element: &ViewElement) -> Result<Element, JsValue> {
    let el = document.create_element(element.tag)?;
    for (name, value) in &element.attrs {
        el.set_attribute(name, value)?;
    }
    for child in &element.children {
        let node: Node = match child {
            ViewNode::Text(text) => document.create_text_node(text).into(),
            ViewNode::Element(child) => build_element(document, child)?.into(),
        };
        el.append_child(&node)?;
    }
    Ok(el)
}

/// Position of `row` among the children of `tbody`.
pub fn row_index(tbody: &Element, row: &Element) -> Option<usize> {
    let row: &Node = row;
    let rows = tbody.children();
    (0..rows.length())
        .find(|&i| {
            rows.item(i)
                .is_some_and(|candidate| candidate.is_same_node(Some(row)))
        })
        .map(|i| i as usize)
}
