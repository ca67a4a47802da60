//! riskmap-wasm — browser front end for riskmap-core
//!
//! Draws census tracts on a Mapbox GL map, colored by socioeconomic risk
//! quintile, fills the side-panel table from the same GeoJSON, and wires up
//! the nav/popup buttons.
//!
//! What it provides
//! ----------------
//! - Panic hook + console logger on module load (via `#[wasm_bindgen(start)]`)
//! - `mount(config)` — builds the map, fetches the tracts, fills the table.
//!   Returns a [`RiskMap`] handle.
//! - `open_nav()`, `close_nav()`, `open_popup(n)`, `close_popup(n)` for
//!   inline `onclick` handlers (default element ids), plus the same methods
//!   on the handle (configured ids).
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { mount } from './pkg/riskmap_wasm.js';
//!
//! async function main() {
//!   await init();
//!   // every key is optional; see MapConfig
//!   window.riskmap = mount({ access_token: 'pk.…', data_url: 'data/map.geojson' });
//! }
//! main();
//! ```
//!
//! Notes
//! -----
//! - `mapbox-gl.js` must be loaded before `mount` is called.
//! - A failed data fetch is logged to the console and setup stops there: the
//!   base map stays up with no tract layer and the table stays empty.
//! - See `www/` for a page that provides every element id.
use std::cell::RefCell;
use std::rc::Rc;

use riskmap_core::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub mod console;
pub mod dom;
pub mod fetch;
pub mod mapbox;

use crate::dom::DomTable;
use crate::mapbox::{MapLayerMouseEvent, MapboxMap, MapboxSurface, NavigationControl};
use riskmap_core::style::FILL_LAYER_ID;

/// Page state for one mounted map. Shared by the callbacks as
/// `Rc<RefCell<App>>`; nothing lives in a global.
struct App {
    config: MapConfig,
    map: MapboxMap,
    installer: LayerInstaller,
    tracts: Option<Rc<FeatureCollection>>,
    table: Option<DomTable>,
}

type SharedApp = Rc<RefCell<App>>;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console::init(log::LevelFilter::Info);
}

/// Handle returned by [`mount`].
#[wasm_bindgen]
pub struct RiskMap {
    app: SharedApp,
}

/// Build the map and kick off the data fetch.
///
/// `config` is a (partial) `MapConfig` object; `undefined`/`null` means
/// defaults.
#[wasm_bindgen]
pub fn mount(config: JsValue) -> std::result::Result<RiskMap, JsValue> {
    let config: MapConfig = if config.is_undefined() || config.is_null() {
        MapConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };
    mount_with(config).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn mount_with(config: MapConfig) -> riskmap_core::Result<RiskMap> {
    if !config.access_token.is_empty() {
        mapbox::set_access_token(&config.access_token)?;
    }

    let map = MapboxMap::new(&mapbox::to_js(&config.map_options())?).map_err(console::js_error)?;
    map.add_control(&NavigationControl::new(), &config.navigation_position);

    let data_url = config.data_url.clone();
    let app: SharedApp = Rc::new(RefCell::new(App {
        config,
        map,
        installer: LayerInstaller::new(),
        tracts: None,
        table: None,
    }));

    // Base style ready: layers (if the data beat us here) and the legend.
    {
        let app_cb = app.clone();
        let on_load = Closure::<dyn FnMut()>::new(move || {
            setup_map_layers(&app_cb);
            let legend_id = app_cb.borrow().config.dom.legend.clone();
            console::report(
                "legend",
                dom::document().and_then(|doc| dom::render_legend(&doc, &legend_id)),
            );
        });
        app.borrow().map.on("load", on_load.as_ref().unchecked_ref());
        on_load.forget();
    }

    let app_fetch = app.clone();
    wasm_bindgen_futures::spawn_local(async move {
        match fetch::fetch_collection(&data_url).await {
            Ok(tracts) => {
                app_fetch.borrow_mut().tracts = Some(Rc::new(tracts));
                setup_map_layers(&app_fetch);
                console::report("table", populate_table(&app_fetch));
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Failed to fetch data: {e}").into());
            }
        }
    });

    Ok(RiskMap { app })
}

/* --------------------------------------------------------------------------
   Map layers
-------------------------------------------------------------------------- */

/// Install now if the style is ready, otherwise once it is.
fn setup_map_layers(app: &SharedApp) {
    let map = app.borrow().map.clone();
    if map.is_style_loaded() {
        add_or_update_layers(app);
        return;
    }
    let app_cb = app.clone();
    let deferred = Closure::once_into_js(move || add_or_update_layers(&app_cb));
    map.once("load", deferred.unchecked_ref());
}

fn add_or_update_layers(app: &SharedApp) {
    let mut guard = app.borrow_mut();
    let App {
        config,
        map,
        installer,
        tracts,
        ..
    } = &mut *guard;

    let Some(tracts) = tracts.as_ref() else {
        log::debug!("style loaded before data; layers wait for the fetch");
        return;
    };

    let outcome = match installer.install(&mut MapboxSurface::new(map), tracts) {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("map layers: {e}");
            return;
        }
    };

    if outcome.attach_handlers {
        attach_event_handlers(map, &config.dom.text_description);
    }
}

fn attach_event_handlers(map: &MapboxMap, panel_id: &str) {
    let panel_id = panel_id.to_string();
    let on_click = Closure::<dyn FnMut(MapLayerMouseEvent)>::new(move |e: MapLayerMouseEvent| {
        console::report("detail panel", show_clicked_feature(&e, &panel_id));
    });
    map.on_layer("click", FILL_LAYER_ID, on_click.as_ref().unchecked_ref());
    on_click.forget();

    let canvas_map = map.clone();
    let on_enter = Closure::<dyn FnMut()>::new(move || {
        console::report("cursor", set_cursor(&canvas_map, "pointer"));
    });
    map.on_layer("mouseenter", FILL_LAYER_ID, on_enter.as_ref().unchecked_ref());
    on_enter.forget();

    let canvas_map = map.clone();
    let on_leave = Closure::<dyn FnMut()>::new(move || {
        console::report("cursor", set_cursor(&canvas_map, ""));
    });
    map.on_layer("mouseleave", FILL_LAYER_ID, on_leave.as_ref().unchecked_ref());
    on_leave.forget();
}

fn set_cursor(map: &MapboxMap, cursor: &str) -> riskmap_core::Result<()> {
    map.get_canvas()
        .style()
        .set_property("cursor", cursor)
        .map_err(console::js_error)
}

fn show_clicked_feature(e: &MapLayerMouseEvent, panel_id: &str) -> riskmap_core::Result<()> {
    let Some(first) = e.features().filter(|f| f.length() > 0).map(|f| f.get(0)) else {
        return Ok(());
    };
    let props = js_sys::Reflect::get(&first, &JsValue::from_str("properties"))
        .map_err(console::js_error)?;
    let props: TractProperties = if props.is_undefined() || props.is_null() {
        TractProperties::default()
    } else {
        serde_wasm_bindgen::from_value(props)
            .map_err(|e| RiskMapError::InvalidData(e.to_string()))?
    };
    dom::show_detail(&dom::document()?, panel_id, &DetailView::from_properties(&props))
}

/* --------------------------------------------------------------------------
   Side table
-------------------------------------------------------------------------- */

fn populate_table(app: &SharedApp) -> riskmap_core::Result<()> {
    let (selector, header_selector, tracts) = {
        let a = app.borrow();
        let tracts = a
            .tracts
            .clone()
            .ok_or_else(|| RiskMapError::InvalidData("table populated before data".into()))?;
        (a.config.table_selector(), a.config.header_selector(), tracts)
    };

    let doc = dom::document()?;
    let table = DomTable::populate(&doc, &selector, build_rows(&tracts))?;
    log::debug!("side table populated with {} rows", table.row_count());
    app.borrow_mut().table = Some(table);

    attach_sort_listeners(app, &doc, &header_selector)
}

fn attach_sort_listeners(
    app: &SharedApp,
    doc: &web_sys::Document,
    header_selector: &str,
) -> riskmap_core::Result<()> {
    let headers = doc
        .query_selector_all(header_selector)
        .map_err(console::js_error)?;
    let icon_selector = format!("{header_selector} i");

    for (i, column) in Column::ALL.into_iter().enumerate() {
        let Some(header) = headers.item(i as u32) else {
            break;
        };
        let app_cb = app.clone();
        let icon_selector = icon_selector.clone();
        let on_click = Closure::<dyn FnMut()>::new(move || {
            console::report("sort", sort_by_header(&app_cb, column, &icon_selector));
        });
        header
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(console::js_error)?;
        on_click.forget();
    }
    Ok(())
}

fn sort_by_header(app: &SharedApp, column: Column, icon_selector: &str) -> riskmap_core::Result<()> {
    let mut guard = app.borrow_mut();
    let Some(table) = guard.table.as_mut() else {
        return Ok(());
    };
    let direction = table.click_header(column)?;
    log::debug!("sorted by {column} ({direction:?})");
    table.update_icons(&dom::document()?, icon_selector)
}

/* --------------------------------------------------------------------------
   Nav & popups
-------------------------------------------------------------------------- */

fn set_nav(ids: &DomIds, state: NavState) -> riskmap_core::Result<()> {
    dom::apply_visibility(&dom::document()?, &state.changes(ids))
}

fn toggle_popup(ids: &DomIds, n: u32) -> riskmap_core::Result<()> {
    let doc = dom::document()?;
    let target = Popup::from_number(n)?;
    let visible = dom::is_visible(&doc, target.element_id(ids))?;
    dom::apply_visibility(&doc, &popup_toggle_plan(target, visible, ids))
}

fn hide_popup(ids: &DomIds, n: u32) -> riskmap_core::Result<()> {
    let target = Popup::from_number(n)?;
    dom::apply_visibility(
        &dom::document()?,
        &[VisibilityChange {
            element_id: target.element_id(ids),
            visible: false,
        }],
    )
}

#[wasm_bindgen]
impl RiskMap {
    pub fn open_nav(&self) {
        console::report("nav", set_nav(&self.app.borrow().config.dom, NavState::Open));
    }

    pub fn close_nav(&self) {
        console::report("nav", set_nav(&self.app.borrow().config.dom, NavState::Closed));
    }

    pub fn open_popup(&self, n: u32) {
        console::report("popup", toggle_popup(&self.app.borrow().config.dom, n));
    }

    pub fn close_popup(&self, n: u32) {
        console::report("popup", hide_popup(&self.app.borrow().config.dom, n));
    }

    /// Number of tracts loaded so far (0 until the fetch completes).
    pub fn tract_count(&self) -> usize {
        self.app.borrow().tracts.as_ref().map_or(0, |t| t.len())
    }
}

#[wasm_bindgen]
pub fn open_nav() {
    console::report("nav", set_nav(&DomIds::default(), NavState::Open));
}

#[wasm_bindgen]
pub fn close_nav() {
    console::report("nav", set_nav(&DomIds::default(), NavState::Closed));
}

#[wasm_bindgen]
pub fn open_popup(n: u32) {
    console::report("popup", toggle_popup(&DomIds::default(), n));
}

#[wasm_bindgen]
pub fn close_popup(n: u32) {
    console::report("popup", hide_popup(&DomIds::default(), n));
}
