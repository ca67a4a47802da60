// crates/riskmap-core/src/config.rs
//! Page configuration: where the data lives, how the map opens, and which
//! element ids the page markup provides.
//!
//! Every field has a default, so `{}` is a valid config and a partial JSON
//! object only overrides what it names.
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;

/// `[longitude, latitude]`
pub type LngLat = [f64; 2];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Mapbox public token. Empty means "leave `mapboxgl.accessToken` alone".
    pub access_token: String,
    pub style_url: String,
    pub zoom: f64,
    pub center: LngLat,
    /// South-west and north-east corners the view may not leave.
    pub max_bounds: [LngLat; 2],
    pub data_url: String,
    pub navigation_position: String,
    pub dom: DomIds,
}

/// Element ids the page markup must provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomIds {
    pub map: String,
    pub legend: String,
    pub side_panel: String,
    pub text_description: String,
    pub description_popup: String,
    pub acknowledge_popup: String,
    pub side_container: String,
    pub open_button: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            style_url: "mapbox://styles/mapbox/light-v11".to_string(),
            zoom: 9.0,
            center: [-122.33359685339107, 47.61195411777029],
            max_bounds: [[-122.7, 47.33], [-122.0, 47.9]],
            data_url: "data/map.geojson".to_string(),
            navigation_position: "top-left".to_string(),
            dom: DomIds::default(),
        }
    }
}

impl Default for DomIds {
    fn default() -> Self {
        Self {
            map: "map".to_string(),
            legend: "legend".to_string(),
            side_panel: "side-panel".to_string(),
            text_description: "text-description".to_string(),
            description_popup: "description-popup".to_string(),
            acknowledge_popup: "acknowledge-popup".to_string(),
            side_container: "side-container".to_string(),
            open_button: "openbtn".to_string(),
        }
    }
}

impl MapConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Options object for the `mapboxgl.Map` constructor.
    pub fn map_options(&self) -> Value {
        json!({
            "container": self.dom.map,
            "style": self.style_url,
            "zoom": self.zoom,
            "maxBounds": self.max_bounds,
            "center": self.center,
        })
    }

    /// CSS selector for the side-panel table.
    pub fn table_selector(&self) -> String {
        format!("#{} table", self.dom.side_panel)
    }

    /// CSS selector for the sortable heading cells.
    pub fn header_selector(&self) -> String {
        format!("#{} th", self.dom.side_panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_the_default() {
        assert_eq!(MapConfig::from_json_str("{}").unwrap(), MapConfig::default());
    }

    #[test]
    fn partial_config_overrides_only_what_it_names() {
        let cfg = MapConfig::from_json_str(
            r#"{ "zoom": 11, "dom": { "side_panel": "tracts" }, "data_url": "x.geojson" }"#,
        )
        .unwrap();
        assert_eq!(cfg.zoom, 11.0);
        assert_eq!(cfg.data_url, "x.geojson");
        assert_eq!(cfg.dom.side_panel, "tracts");
        assert_eq!(cfg.dom.map, "map");
        assert_eq!(cfg.table_selector(), "#tracts table");
        assert_eq!(cfg.header_selector(), "#tracts th");
    }

    #[test]
    fn map_options_use_mapbox_names() {
        let opts = MapConfig::default().map_options();
        assert_eq!(opts["container"], "map");
        assert_eq!(opts["style"], "mapbox://styles/mapbox/light-v11");
        assert_eq!(opts["zoom"], 9.0);
        assert_eq!(opts["maxBounds"][0][0], -122.7);
        assert_eq!(opts["center"][1], 47.61195411777029);
    }
}
