//! Renderer: builds the table's UI tree from a title and records.
//!
//! The output is a small host-neutral element tree ([`Node`]) mirroring the
//! widget's shadow DOM:
//!
//! ```text
//! div.rtl-container
//! ├── div.table-title#title
//! └── table.rtl-table#mainTable
//!     ├── thead#tableHead
//!     └── tbody#tableBody
//! ```
//!
//! Every render rebuilds head and body from scratch, so rendering the same
//! input twice yields identical trees.

use std::fmt::Write as _;

use tracing::{debug, warn};

use crate::config::{ColumnDiscovery, PLACEHOLDER_EN, PLACEHOLDER_HE};
use crate::record::Record;

/// Element id of the title block.
pub const TITLE_ID: &str = "title";
/// Element id of the table.
pub const TABLE_ID: &str = "mainTable";
/// Element id of the table head.
pub const HEAD_ID: &str = "tableHead";
/// Element id of the table body.
pub const BODY_ID: &str = "tableBody";

/// Scoped stylesheet for the widget's shadow root.
pub const STYLESHEET: &str = r":host {
    display: block;
    width: 100%;
    height: 100%;
    font-family: Arial, sans-serif;
}
.rtl-container {
    direction: rtl;
    text-align: right;
    width: 100%;
    height: 100%;
    padding: 15px;
    box-sizing: border-box;
    background: #f9f9f9;
}
.table-title {
    font-size: 20px;
    font-weight: bold;
    margin-bottom: 15px;
    color: #2c3e50;
    text-align: right;
}
.rtl-table {
    width: 100%;
    border-collapse: collapse;
    direction: rtl;
    background: white;
    box-shadow: 0 2px 4px rgba(0,0,0,0.1);
    border-radius: 8px;
    overflow: hidden;
}
.rtl-table th {
    background-color: #3498db;
    color: white;
    padding: 15px 12px;
    text-align: right;
    font-weight: bold;
    border-bottom: 2px solid #2980b9;
}
.rtl-table td {
    padding: 12px;
    text-align: right;
    border-bottom: 1px solid #ecf0f1;
    cursor: pointer;
    transition: background-color 0.3s;
}
.rtl-table tr:nth-child(even) {
    background-color: #f8f9fa;
}
.rtl-table tr:hover {
    background-color: #e8f4fd;
}
.rtl-table tr:last-child td {
    border-bottom: none;
}
.no-data {
    text-align: center;
    padding: 30px;
    color: #7f8c8d;
    font-style: italic;
    font-size: 16px;
}
";

/// A node of the rendered UI tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and children.
    Element(Element),
    /// A text node.
    Text(String),
}

impl Node {
    /// Concatenated text content, like the DOM's `textContent`.
    #[must_use]
    pub fn text_content(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Element(el) => el.text_content(),
        }
    }

    /// Returns the element if this node is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name, lowercase.
    pub tag: &'static str,
    /// Attributes in insertion order.
    pub attrs: Vec<(&'static str, String)>,
    /// Child nodes.
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an element with no attributes or children.
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds an attribute (builder pattern).
    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Appends a child element (builder pattern).
    #[must_use]
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Appends a text child (builder pattern).
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Appends several child elements (builder pattern).
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children.into_iter().map(Node::Element));
        self
    }

    /// Value of attribute `name`, if set.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated text of all descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    /// Depth-first search for the element with the given id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.get_attr("id") == Some(id) {
            return Some(self);
        }
        self.child_elements().find_map(|el| el.find_by_id(id))
    }

    /// Serializes this element as HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, html_escape(value));
        }
        if is_void(self.tag) {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(&html_escape(text)),
                Node::Element(el) => el.write_html(out),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "br" | "hr" | "img" | "input")
}

/// Escapes text for use in HTML content and attribute values.
fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Text of the empty-table message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// First line.
    pub primary: String,
    /// Second line, after a line break.
    pub secondary: String,
}

impl Default for Placeholder {
    fn default() -> Self {
        Self {
            primary: PLACEHOLDER_HE.to_string(),
            secondary: PLACEHOLDER_EN.to_string(),
        }
    }
}

/// Renderer options beyond title and rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// How columns are discovered.
    pub columns: ColumnDiscovery,
    /// Empty-table message.
    pub placeholder: Placeholder,
}

/// Result of one render: the whole widget tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    root: Element,
    columns: Vec<String>,
    placeholder: bool,
}

impl TableView {
    /// Root `div.rtl-container` element.
    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Displayed columns, in header order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Title text.
    #[must_use]
    pub fn title(&self) -> String {
        self.part(TITLE_ID).text_content()
    }

    /// The `thead` element.
    #[must_use]
    pub fn head(&self) -> &Element {
        self.part(HEAD_ID)
    }

    /// The `tbody` element.
    #[must_use]
    pub fn body(&self) -> &Element {
        self.part(BODY_ID)
    }

    /// Header cells (`th`), empty when the placeholder is shown or the first
    /// record has no columns.
    pub fn header_cells(&self) -> impl Iterator<Item = &Element> {
        self.head()
            .child_elements()
            .flat_map(Element::child_elements)
    }

    /// Body rows (`tr`), including the placeholder row.
    pub fn body_rows(&self) -> impl Iterator<Item = &Element> {
        self.body().child_elements()
    }

    /// Whether this view shows the empty-table message.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Serializes the tree as HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.root.to_html()
    }

    fn part(&self, id: &str) -> &Element {
        // Built by `render`, which always creates every id.
        self.root.find_by_id(id).unwrap_or(&self.root)
    }
}

/// Determines the columns for `rows` under `policy`.
///
/// With [`ColumnDiscovery::FirstRecord`], keys present only in later records
/// are not displayed; a warning is logged when that happens.
#[must_use]
pub fn discover_columns(rows: &[Record], policy: ColumnDiscovery) -> Vec<String> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    let mut columns: Vec<String> = first.keys().map(String::from).collect();

    for record in &rows[1..] {
        for key in record.keys() {
            if columns.iter().any(|c| c == key) {
                continue;
            }
            match policy {
                ColumnDiscovery::AllRecords => columns.push(key.to_string()),
                ColumnDiscovery::FirstRecord => {
                    warn!(column = key, "column missing from first record is not displayed");
                }
            }
        }
    }

    columns
}

/// Renders `title` and `rows` with default options.
///
/// # Example
///
/// ```rust
/// use rtl_table::{Record, render};
///
/// let rows = vec![Record::from_iter([("Region", "West"), ("Sales", "100")])];
/// let view = render("Sales", &rows);
///
/// assert_eq!(view.header_cells().count(), 2);
/// assert_eq!(view.body_rows().count(), 1);
/// ```
#[must_use]
pub fn render(title: &str, rows: &[Record]) -> TableView {
    render_with(title, rows, &RenderOptions::default())
}

/// Renders `title` and `rows`.
///
/// Empty `rows` produce one placeholder row spanning the table and no header.
/// Otherwise there is one header cell per column and one body row per record,
/// each cell holding the record's value or an empty string.
#[must_use]
pub fn render_with(title: &str, rows: &[Record], options: &RenderOptions) -> TableView {
    let title_block = Element::new("div")
        .attr("class", "table-title")
        .attr("id", TITLE_ID)
        .text(title);

    let mut head = Element::new("thead").attr("id", HEAD_ID);
    let mut body = Element::new("tbody").attr("id", BODY_ID);

    let columns = discover_columns(rows, options.columns);
    let placeholder = rows.is_empty();
    if placeholder {
        body = body.child(placeholder_row(&options.placeholder));
    } else {
        let header = Element::new("tr").children(
            columns
                .iter()
                .map(|column| Element::new("th").text(column.as_str())),
        );
        head = head.child(header);
        body = body.children(rows.iter().map(|record| {
            Element::new("tr").children(
                columns
                    .iter()
                    .map(|column| Element::new("td").text(record.display(column))),
            )
        }));
    }

    debug!(rows = rows.len(), columns = columns.len(), "rendered table");

    let table = Element::new("table")
        .attr("class", "rtl-table")
        .attr("id", TABLE_ID)
        .child(head)
        .child(body);
    let root = Element::new("div")
        .attr("class", "rtl-container")
        .child(title_block)
        .child(table);

    TableView {
        root,
        columns,
        placeholder,
    }
}

fn placeholder_row(placeholder: &Placeholder) -> Element {
    let cell = Element::new("td")
        .attr("colspan", "100%")
        .attr("class", "no-data")
        .text(placeholder.primary.as_str())
        .child(Element::new("br"))
        .text(placeholder.secondary.as_str());
    Element::new("tr").child(cell)
}
