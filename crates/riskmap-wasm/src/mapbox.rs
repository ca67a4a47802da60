//! Bindings to the parts of Mapbox GL JS the choropleth uses.
//!
//! Mapbox is loaded by the page as the global `mapboxgl`; nothing here
//! bundles it.
use riskmap_core::binding::MapSurface;
use riskmap_core::error::{Result, RiskMapError};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::console::js_error;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Map)]
    #[derive(Debug, Clone)]
    pub type MapboxMap;

    #[wasm_bindgen(constructor, catch, js_namespace = mapboxgl, js_class = "Map")]
    pub fn new(options: &JsValue) -> std::result::Result<MapboxMap, JsValue>;

    #[wasm_bindgen(method, js_name = isStyleLoaded)]
    pub fn is_style_loaded(this: &MapboxMap) -> bool;

    /// `undefined` when no source has that id.
    #[wasm_bindgen(method, js_name = getSource)]
    pub fn get_source(this: &MapboxMap, id: &str) -> JsValue;

    #[wasm_bindgen(method, catch, js_name = addSource)]
    pub fn add_source(
        this: &MapboxMap,
        id: &str,
        source: &JsValue,
    ) -> std::result::Result<JsValue, JsValue>;

    /// `undefined` when no layer has that id.
    #[wasm_bindgen(method, js_name = getLayer)]
    pub fn get_layer(this: &MapboxMap, id: &str) -> JsValue;

    #[wasm_bindgen(method, catch, js_name = addLayer)]
    pub fn add_layer(this: &MapboxMap, layer: &JsValue) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(method, js_name = addControl)]
    pub fn add_control(this: &MapboxMap, control: &NavigationControl, position: &str);

    #[wasm_bindgen(method, js_name = on)]
    pub fn on(this: &MapboxMap, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_name = on)]
    pub fn on_layer(this: &MapboxMap, event: &str, layer_id: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_name = once)]
    pub fn once(this: &MapboxMap, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_name = getCanvas)]
    pub fn get_canvas(this: &MapboxMap) -> web_sys::HtmlCanvasElement;

    #[wasm_bindgen(js_namespace = mapboxgl, js_name = GeoJSONSource)]
    #[derive(Debug, Clone)]
    pub type GeoJsonSource;

    #[wasm_bindgen(method, js_name = setData)]
    pub fn set_data(this: &GeoJsonSource, data: &JsValue);

    #[wasm_bindgen(js_namespace = mapboxgl, js_name = NavigationControl)]
    #[derive(Debug, Clone)]
    pub type NavigationControl;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl, js_class = "NavigationControl")]
    pub fn new() -> NavigationControl;

    /// Event passed to layer-scoped mouse handlers.
    #[derive(Debug, Clone)]
    pub type MapLayerMouseEvent;

    #[wasm_bindgen(method, getter)]
    pub fn features(this: &MapLayerMouseEvent) -> Option<js_sys::Array>;
}

/// The `mapboxgl` global, if the page loaded the library.
pub fn mapboxgl() -> Result<JsValue> {
    let gl = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("mapboxgl"))
        .map_err(js_error)?;
    if is_present(&gl) {
        Ok(gl)
    } else {
        Err(RiskMapError::Js(
            "mapboxgl is not loaded; include mapbox-gl.js before this module".into(),
        ))
    }
}

pub fn set_access_token(token: &str) -> Result<()> {
    js_sys::Reflect::set(
        &mapboxgl()?,
        &JsValue::from_str("accessToken"),
        &JsValue::from_str(token),
    )
    .map_err(js_error)?;
    Ok(())
}

/// Plain-object conversion: JSON maps become JS objects, not `Map`s, which
/// is what the Mapbox style parser expects.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| RiskMapError::Js(e.to_string()))
}

fn is_present(v: &JsValue) -> bool {
    !v.is_undefined() && !v.is_null()
}

/// [`MapSurface`] over a live Mapbox map.
pub struct MapboxSurface<'a> {
    map: &'a MapboxMap,
}

impl<'a> MapboxSurface<'a> {
    pub fn new(map: &'a MapboxMap) -> Self {
        Self { map }
    }
}

impl MapSurface for MapboxSurface<'_> {
    fn has_source(&self, id: &str) -> bool {
        is_present(&self.map.get_source(id))
    }

    fn add_source(&mut self, id: &str, spec: &Value) -> Result<()> {
        self.map.add_source(id, &to_js(spec)?).map_err(js_error)?;
        Ok(())
    }

    fn set_source_data(&mut self, id: &str, data: &Value) -> Result<()> {
        let source = self.map.get_source(id);
        if !is_present(&source) {
            return Err(RiskMapError::Js(format!("no source with id {id}")));
        }
        source.unchecked_into::<GeoJsonSource>().set_data(&to_js(data)?);
        Ok(())
    }

    fn has_layer(&self, id: &str) -> bool {
        is_present(&self.map.get_layer(id))
    }

    fn add_layer(&mut self, spec: &Value) -> Result<()> {
        self.map.add_layer(&to_js(spec)?).map_err(js_error)?;
        Ok(())
    }
}
