// crates/riskmap-core/src/model.rs
//! # Data Model
//!
//! A thin, typed view over a GeoJSON `FeatureCollection` of census tracts.
//!
//! Only the four tract attributes the map and table care about are lifted
//! into typed fields. Geometry and every other property are carried through
//! untouched so the collection can be handed back to the renderer as-is.
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// GeoJSON property holding the tract display name.
pub const NAME_PROPERTY: &str = "TractNameLong";
/// GeoJSON property holding the socioeconomic risk quintile (1–5, 0 = no bucket).
pub const QUINTILE_PROPERTY: &str = "SDQuintile";
/// GeoJSON property holding the total population.
pub const POPULATION_PROPERTY: &str = "TotalPop";
/// GeoJSON property holding the median household device count.
pub const DEVICES_PROPERTY: &str = "HHMedianDeviceCount";

pub(crate) const COLLECTION_KIND: &str = "FeatureCollection";
const FEATURE_KIND: &str = "Feature";

/// The whole tract document. Loaded once, never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<Feature>,
    /// `bbox`, `crs`, `name` and whatever else the exporter wrote.
    #[serde(flatten)]
    pub foreign: Map<String, Value>,
}

/// One tract polygon with its attributes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default = "feature_kind")]
    pub kind: String,
    /// Opaque to us; projection and hit-testing belong to the renderer.
    #[serde(default)]
    pub geometry: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: TractProperties,
    #[serde(flatten)]
    pub foreign: Map<String, Value>,
}

/// Tract attributes, kept exactly as the document spelled them.
///
/// Nothing is validated on the way in: the raw object is what the map source
/// receives and what the table and detail panel print. The typed accessors
/// are lenient readings of it; a value they cannot read is `None` there but
/// stays in the document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TractProperties {
    raw: Map<String, Value>,
}

/// Aggregate counts over a collection.
///
/// `by_quintile[q]` counts features whose quintile is exactly `q` (0..=5);
/// anything missing or outside that range lands in `unbucketed`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub features: usize,
    pub by_quintile: [usize; 6],
    pub unbucketed: usize,
    pub total_population: f64,
}

fn feature_kind() -> String {
    FEATURE_KIND.to_string()
}

fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: COLLECTION_KIND.to_string(),
            features,
            foreign: Map::new(),
        }
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn stats(&self) -> CollectionStats {
        let mut stats = CollectionStats {
            features: self.features.len(),
            by_quintile: [0; 6],
            unbucketed: 0,
            total_population: 0.0,
        };

        for f in &self.features {
            match f.properties.risk_quintile() {
                Some(q @ 0..=5) => stats.by_quintile[q as usize] += 1,
                _ => stats.unbucketed += 1,
            }
            stats.total_population += f.properties.total_population().unwrap_or(0.0);
        }
        stats
    }

    /// The document as a JSON value, ready to become a map source's `data`.
    pub fn to_value(&self) -> Value {
        // Every field is already JSON-shaped; serialization cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Feature {
    pub fn new(properties: TractProperties, geometry: Value) -> Self {
        Self {
            kind: feature_kind(),
            geometry,
            properties,
            foreign: Map::new(),
        }
    }

    pub fn properties(&self) -> &TractProperties {
        &self.properties
    }
}

impl TractProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly for tests and demos.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.raw.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// Display name; empty when missing.
    pub fn name(&self) -> String {
        self.text(NAME_PROPERTY)
    }

    /// The quintile as a whole bucket number. `2.5`, `"n/a"` and friends are
    /// `None`.
    pub fn risk_quintile(&self) -> Option<i64> {
        let v = self.raw.get(QUINTILE_PROPERTY)?;
        if let Some(i) = v.as_i64() {
            return Some(i);
        }
        // 3.0 or "3" still count
        lenient::to_f64(v)
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    }

    /// The quintile as the map's paint expression reads it (`to-number`):
    /// fractional values included.
    pub fn risk_value(&self) -> Option<f64> {
        self.number(QUINTILE_PROPERTY)
    }

    pub fn total_population(&self) -> Option<f64> {
        self.number(POPULATION_PROPERTY)
    }

    pub fn median_device_count(&self) -> Option<f64> {
        self.number(DEVICES_PROPERTY)
    }

    /// Text of a property the way a browser would print it: strings as-is,
    /// numbers in shortest form, missing or `null` as empty.
    pub fn text(&self, key: &str) -> String {
        self.raw.get(key).map(lenient::display).unwrap_or_default()
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.raw.get(key).and_then(lenient::to_f64)
    }
}

impl From<Map<String, Value>> for TractProperties {
    fn from(raw: Map<String, Value>) -> Self {
        Self { raw }
    }
}

// -----------------------------------------------------------------------------
// Lenient field parsing
// -----------------------------------------------------------------------------

mod lenient {
    use serde_json::Value;

    pub(super) fn to_f64(v: &Value) -> Option<f64> {
        match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|f| f.is_finite())
    }

    pub(super) fn display(v: &Value) -> String {
        match v {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            // 3.0 prints as "3", like the browser would
            Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
                (Some(i), _, _) => i.to_string(),
                (_, Some(u), _) => u.to_string(),
                (_, _, Some(f)) => f.to_string(),
                _ => n.to_string(),
            },
            other => other.to_string(),
        }
    }
}
