// crates/riskmap-core/src/binding.rs
//! Registering the tract data with a map renderer.
//!
//! [`MapSurface`] is the handful of renderer calls the choropleth needs. The
//! browser implements it over Mapbox GL; tests implement it over a `Vec`.
//! [`LayerInstaller`] drives those calls and is safe to run any number of
//! times, which matters because setup fires both from the data fetch and
//! from the renderer's own `load` event.
use crate::error::Result;
use crate::model::FeatureCollection;
use crate::style::{self, FILL_LAYER_ID, OUTLINE_LAYER_ID, SOURCE_ID};
use serde_json::Value;

/// Source/layer registry of a map renderer.
pub trait MapSurface {
    fn has_source(&self, id: &str) -> bool;
    fn add_source(&mut self, id: &str, spec: &Value) -> Result<()>;
    /// Replace the data of an existing GeoJSON source in place.
    fn set_source_data(&mut self, id: &str, data: &Value) -> Result<()>;

    fn has_layer(&self, id: &str) -> bool;
    /// `spec` carries its own `"id"`.
    fn add_layer(&mut self, spec: &Value) -> Result<()>;
}

/// What a single [`LayerInstaller::install`] call changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOutcome {
    pub source_added: bool,
    pub source_updated: bool,
    pub fill_added: bool,
    pub outline_added: bool,
    /// Hover/click handlers still need wiring onto the fill layer.
    /// True on the first successful install only.
    pub attach_handlers: bool,
}

#[derive(Debug, Default)]
pub struct LayerInstaller {
    handlers_attached: bool,
}

impl LayerInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handlers_attached(&self) -> bool {
        self.handlers_attached
    }

    pub fn install<M: MapSurface + ?Sized>(
        &mut self,
        map: &mut M,
        data: &FeatureCollection,
    ) -> Result<InstallOutcome> {
        let mut out = InstallOutcome::default();

        if map.has_source(SOURCE_ID) {
            map.set_source_data(SOURCE_ID, &data.to_value())?;
            out.source_updated = true;
        } else {
            map.add_source(SOURCE_ID, &style::source_spec(data))?;
            out.source_added = true;
        }

        if !map.has_layer(FILL_LAYER_ID) {
            map.add_layer(&style::fill_layer_spec())?;
            out.fill_added = true;
        }

        if !map.has_layer(OUTLINE_LAYER_ID) {
            map.add_layer(&style::outline_layer_spec())?;
            out.outline_added = true;
        }

        if !self.handlers_attached {
            self.handlers_attached = true;
            out.attach_handlers = true;
        }

        log::debug!("map layers installed: {out:?}");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RiskMapError;
    use crate::model::{Feature, TractProperties, NAME_PROPERTY, QUINTILE_PROPERTY};

    /// Renderer stand-in that, like Mapbox, refuses duplicate ids.
    #[derive(Default)]
    struct FakeMap {
        sources: Vec<(String, Value)>,
        layers: Vec<Value>,
        data_updates: usize,
    }

    impl MapSurface for FakeMap {
        fn has_source(&self, id: &str) -> bool {
            self.sources.iter().any(|(s, _)| s == id)
        }

        fn add_source(&mut self, id: &str, spec: &Value) -> Result<()> {
            if self.has_source(id) {
                return Err(RiskMapError::Js(format!("source {id} already exists")));
            }
            self.sources.push((id.to_string(), spec.clone()));
            Ok(())
        }

        fn set_source_data(&mut self, id: &str, data: &Value) -> Result<()> {
            let (_, spec) = self
                .sources
                .iter_mut()
                .find(|(s, _)| s == id)
                .ok_or_else(|| RiskMapError::Js(format!("no source {id}")))?;
            spec["data"] = data.clone();
            self.data_updates += 1;
            Ok(())
        }

        fn has_layer(&self, id: &str) -> bool {
            self.layers.iter().any(|l| l["id"] == id)
        }

        fn add_layer(&mut self, spec: &Value) -> Result<()> {
            let id = spec["id"].as_str().unwrap_or_default();
            if self.has_layer(id) {
                return Err(RiskMapError::Js(format!("layer {id} already exists")));
            }
            self.layers.push(spec.clone());
            Ok(())
        }
    }

    fn tracts(n: usize) -> FeatureCollection {
        FeatureCollection::new(
            (0..n)
                .map(|i| {
                    Feature::new(
                        TractProperties::new()
                            .with(NAME_PROPERTY, format!("Tract {i}"))
                            .with(QUINTILE_PROPERTY, i % 5 + 1),
                        Value::Null,
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn first_install_adds_everything() {
        let mut map = FakeMap::default();
        let mut installer = LayerInstaller::new();

        let out = installer.install(&mut map, &tracts(3)).unwrap();

        assert!(out.source_added && out.fill_added && out.outline_added);
        assert!(out.attach_handlers);
        assert_eq!(map.sources.len(), 1);
        assert_eq!(map.layers.len(), 2);
        assert_eq!(map.layers[0]["id"], FILL_LAYER_ID);
        assert_eq!(map.layers[1]["id"], OUTLINE_LAYER_ID);
    }

    #[test]
    fn second_install_is_idempotent() {
        let mut map = FakeMap::default();
        let mut installer = LayerInstaller::new();

        installer.install(&mut map, &tracts(3)).unwrap();
        let out = installer.install(&mut map, &tracts(4)).unwrap();

        assert_eq!(
            out,
            InstallOutcome {
                source_updated: true,
                ..Default::default()
            }
        );
        assert_eq!(map.sources.len(), 1);
        assert_eq!(map.data_updates, 1);
        assert_eq!(map.sources[0].1["data"]["features"].as_array().unwrap().len(), 4);
        let fills = map.layers.iter().filter(|l| l["id"] == FILL_LAYER_ID).count();
        let outlines = map.layers.iter().filter(|l| l["id"] == OUTLINE_LAYER_ID).count();
        assert_eq!((fills, outlines), (1, 1));
        assert!(installer.handlers_attached());
    }

    #[test]
    fn existing_source_from_elsewhere_is_updated_not_readded() {
        let mut map = FakeMap::default();
        map.add_source(SOURCE_ID, &serde_json::json!({ "type": "geojson", "data": null }))
            .unwrap();

        let out = LayerInstaller::new().install(&mut map, &tracts(2)).unwrap();

        assert!(out.source_updated);
        assert!(!out.source_added);
        assert_eq!(map.sources[0].1["data"]["type"], "FeatureCollection");
    }
}
