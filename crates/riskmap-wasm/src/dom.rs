//! Imperative DOM side: legend, detail panel, side table, popups.
//!
//! Decisions (what to show, in which order) come from `riskmap-core`; this
//! module only applies them to elements.
use riskmap_core::error::{Result, RiskMapError};
use riskmap_core::panel::DetailView;
use riskmap_core::style::legend_entries;
use riskmap_core::table::{CellText, Column, PinnedTable, Row, SortDirection, SortableTable};
use riskmap_core::widgets::{display_value, VisibilityChange};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, HtmlElement, HtmlTableElement, HtmlTableRowElement, HtmlTableSectionElement, Node,
};

use crate::console::js_error;

pub fn document() -> Result<Document> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| RiskMapError::Dom("no document".into()))
}

pub fn element_by_id(doc: &Document, id: &str) -> Result<HtmlElement> {
    doc.get_element_by_id(id)
        .ok_or_else(|| RiskMapError::Dom(format!("no element with id \"{id}\"")))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| RiskMapError::Dom(format!("#{id} is not an HTML element")))
}

fn cast<T: JsCast>(value: impl JsCast, what: &str) -> Result<T> {
    value
        .dyn_into::<T>()
        .map_err(|_| RiskMapError::Dom(format!("{what} has an unexpected element type")))
}

/* --------------------------------------------------------------------------
   Visibility toggles
-------------------------------------------------------------------------- */

pub fn is_visible(doc: &Document, id: &str) -> Result<bool> {
    let display = element_by_id(doc, id)?
        .style()
        .get_property_value("display")
        .map_err(js_error)?;
    Ok(display == display_value(true))
}

pub fn apply_visibility(doc: &Document, changes: &[VisibilityChange<'_>]) -> Result<()> {
    for change in changes {
        element_by_id(doc, change.element_id)?
            .style()
            .set_property("display", display_value(change.visible))
            .map_err(js_error)?;
    }
    Ok(())
}

/* --------------------------------------------------------------------------
   Legend & detail panel
-------------------------------------------------------------------------- */

pub fn render_legend(doc: &Document, legend_id: &str) -> Result<()> {
    let legend = element_by_id(doc, legend_id)?;
    for entry in legend_entries() {
        let key: HtmlElement = cast(doc.create_element("div").map_err(js_error)?, "legend key")?;
        key.set_class_name("legend-key");
        key.style()
            .set_property("background-color", entry.color)
            .map_err(js_error)?;
        key.set_inner_html(entry.label);
        legend.append_child(&key).map_err(js_error)?;
    }
    Ok(())
}

pub fn show_detail(doc: &Document, panel_id: &str, view: &DetailView) -> Result<()> {
    element_by_id(doc, panel_id)?.set_inner_html(&view.to_html());
    Ok(())
}

/* --------------------------------------------------------------------------
   Side table
-------------------------------------------------------------------------- */

/// A table row model together with the `<tr>` that displays it.
pub struct TableRow {
    row: Row,
    element: HtmlTableRowElement,
}

impl CellText for TableRow {
    fn cell_text(&self, column: Column) -> &str {
        self.row.cell_text(column)
    }
}

/// The populated side-panel table.
pub struct DomTable {
    body: HtmlTableSectionElement,
    /// The page may put the heading `<tr>` inside the body; it then has to
    /// be re-appended first on every render.
    header_in_body: bool,
    sortable: SortableTable<TableRow>,
}

impl DomTable {
    /// Append one `<tr>` per row under the table matched by `selector`.
    /// The table's first existing row is the heading.
    pub fn populate(doc: &Document, selector: &str, rows: Vec<Row>) -> Result<Self> {
        let table: HtmlTableElement = cast(
            doc.query_selector(selector)
                .map_err(js_error)?
                .ok_or_else(|| RiskMapError::Dom(format!("nothing matches \"{selector}\"")))?,
            selector,
        )?;

        let header: HtmlTableRowElement = cast(
            table
                .rows()
                .item(0)
                .ok_or_else(|| RiskMapError::Dom(format!("{selector} has no heading row")))?,
            "heading row",
        )?;

        let body: HtmlTableSectionElement = match table.t_bodies().item(0) {
            Some(b) => cast(b, "table body")?,
            None => cast(table.create_t_body(), "table body")?,
        };

        let body_node: &Node = body.as_ref();
        let header_in_body = header
            .parent_node()
            .is_some_and(|p| p.is_same_node(Some(body_node)));

        let mut handles = Vec::with_capacity(rows.len());
        for row in rows {
            let element: HtmlTableRowElement =
                cast(doc.create_element("tr").map_err(js_error)?, "row")?;
            for text in row.cells() {
                let cell = doc.create_element("td").map_err(js_error)?;
                cell.set_text_content(Some(text));
                element.append_child(&cell).map_err(js_error)?;
            }
            body.append_child(&element).map_err(js_error)?;
            handles.push(TableRow { row, element });
        }

        let header = TableRow {
            row: Row::heading(),
            element: header,
        };
        Ok(Self {
            body,
            header_in_body,
            sortable: SortableTable::new(PinnedTable::new(header, handles)),
        })
    }

    /// Body rows, heading excluded.
    pub fn row_count(&self) -> usize {
        self.sortable.table().body().len()
    }

    /// Flip the column's direction, re-sort and redraw the body.
    pub fn click_header(&mut self, column: Column) -> Result<SortDirection> {
        let direction = self.sortable.click_header(column);
        self.render()?;
        Ok(direction)
    }

    /// Set each heading's `<i>` icon class from the toggle state.
    pub fn update_icons(&self, doc: &Document, icon_selector: &str) -> Result<()> {
        let icons = doc.query_selector_all(icon_selector).map_err(js_error)?;
        for (i, column) in Column::ALL.iter().enumerate() {
            if let Some(node) = icons.item(i as u32) {
                let icon: web_sys::Element = cast(node, "sort icon")?;
                icon.set_class_name(self.sortable.toggles().icon_class(*column));
            }
        }
        Ok(())
    }

    /// Empty the body and re-append rows in model order. Cells are untouched.
    fn render(&self) -> Result<()> {
        while let Some(child) = self.body.first_child() {
            self.body.remove_child(&child).map_err(js_error)?;
        }

        let table = self.sortable.table();
        if self.header_in_body {
            self.body
                .append_child(&table.header().element)
                .map_err(js_error)?;
        }
        for row in table.body() {
            self.body.append_child(&row.element).map_err(js_error)?;
        }
        Ok(())
    }
}
