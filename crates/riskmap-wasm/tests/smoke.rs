use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

use riskmap_core::prelude::*;
use riskmap_wasm::dom::{self, DomTable};

wasm_bindgen_test_configure!(run_in_browser);

fn fixture(id: &str, html: &str) -> HtmlElement {
    let doc = dom::document().unwrap();
    if let Some(old) = doc.get_element_by_id(id) {
        old.remove();
    }
    let host: HtmlElement = doc.create_element("div").unwrap().dyn_into().unwrap();
    host.set_id(id);
    host.set_inner_html(html);
    doc.body().unwrap().append_child(&host).unwrap();
    host
}

fn row(name: &str, pop: &str) -> Row {
    Row::new([name.into(), "1".into(), pop.into(), "2".into()])
}

fn dom_names(host: &HtmlElement) -> Vec<String> {
    let cells = host.query_selector_all("tbody tr td:first-child").unwrap();
    (0..cells.length())
        .filter_map(|i| cells.item(i))
        .filter_map(|n| n.text_content())
        .collect()
}

#[wasm_bindgen_test]
fn table_rows_follow_header_clicks() {
    let host = fixture(
        "sort-fixture",
        "<table><thead><tr><th>Area <i></i></th><th>Risk <i></i></th>\
         <th>Population <i></i></th><th>Devices <i></i></th></tr></thead></table>",
    );
    let doc = dom::document().unwrap();

    let mut table = DomTable::populate(
        &doc,
        "#sort-fixture table",
        vec![row("Beacon Hill", "500"), row("Ada Street", "100"), row("Central", "300")],
    )
    .unwrap();
    assert_eq!(table.row_count(), 3);
    assert_eq!(dom_names(&host), ["Beacon Hill", "Ada Street", "Central"]);

    assert_eq!(table.click_header(Column::Name).unwrap(), SortDirection::Ascending);
    assert_eq!(dom_names(&host), ["Ada Street", "Beacon Hill", "Central"]);

    assert_eq!(table.click_header(Column::Population).unwrap(), SortDirection::Ascending);
    assert_eq!(dom_names(&host), ["Ada Street", "Central", "Beacon Hill"]);

    table.update_icons(&doc, "#sort-fixture th i").unwrap();
    let icons = host.query_selector_all("th i").unwrap();
    let pop_icon: web_sys::Element = icons.item(2).unwrap().dyn_into().unwrap();
    assert_eq!(pop_icon.class_name(), "fa fa-fw fa-sort-up");

    // heading stays where the page put it
    let first_row = host.query_selector("table tr").unwrap().unwrap();
    assert!(first_row.parent_element().unwrap().tag_name().eq_ignore_ascii_case("thead"));
}

#[wasm_bindgen_test]
fn popups_are_mutually_exclusive() {
    let ids = DomIds::default();
    fixture(
        "popup-fixture",
        "<div id=\"description-popup\" style=\"display:none\"></div>\
         <div id=\"acknowledge-popup\" style=\"display:block\"></div>",
    );

    riskmap_wasm::open_popup(1);
    let doc = dom::document().unwrap();
    assert!(dom::is_visible(&doc, &ids.description_popup).unwrap());
    assert!(!dom::is_visible(&doc, &ids.acknowledge_popup).unwrap());

    riskmap_wasm::open_popup(1);
    assert!(!dom::is_visible(&doc, &ids.description_popup).unwrap());
}

#[wasm_bindgen_test]
fn legend_has_five_keys() {
    let host = fixture("legend", "");
    dom::render_legend(&dom::document().unwrap(), "legend").unwrap();
    assert_eq!(host.query_selector_all(".legend-key").unwrap().length(), 5);
    assert_eq!(host.text_content().unwrap(), "Very LowLowMediumHighVery High");
}

#[wasm_bindgen_test]
fn detail_panel_is_replaced() {
    let host = fixture("text-description", "<p>old</p>");
    let view = DetailView::from_properties(
        &TractProperties::new()
            .with(riskmap_core::model::NAME_PROPERTY, "Central")
            .with(riskmap_core::model::QUINTILE_PROPERTY, 3),
    );
    dom::show_detail(&dom::document().unwrap(), "text-description", &view).unwrap();
    assert_eq!(host.query_selector("h3").unwrap().unwrap().text_content().unwrap(), "Central");
    assert!(!host.inner_html().contains("old"));
}
