// crates/riskmap-core/src/style.rs
//! Map source/layer definitions and the risk color scale.
//!
//! The JSON built here is handed verbatim to Mapbox GL (`addSource`,
//! `addLayer`), so key names follow the Mapbox style specification.
use crate::model::{FeatureCollection, QUINTILE_PROPERTY};
use serde::Serialize;
use serde_json::{json, Value};

pub const SOURCE_ID: &str = "geojson_data";
pub const FILL_LAYER_ID: &str = "geojson_data_layer";
pub const OUTLINE_LAYER_ID: &str = "geojson_data_borders";

/// Color for tracts with no bucket, a missing quintile, or a value below 1.
pub const NEUTRAL_COLOR: &str = "#808080";

/// Fill colors for quintiles 1..=5, in step order.
pub const QUINTILE_COLORS: [&str; 5] = ["#f8f8f8", "#f8baba", "#f87c7c", "#f83e3e", "#f80000"];

pub const FILL_OPACITY: f64 = 0.7;
pub const OUTLINE_COLOR: &str = "#000000";
pub const OUTLINE_WIDTH: f64 = 1.0;

const QUINTILE_LABELS: [&str; 5] = ["Very Low", "Low", "Medium", "High", "Very High"];

/// One swatch of the map legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub color: &'static str,
    pub label: &'static str,
}

/// `["step", input, default, 1, c1, 2, c2, ...]`.
///
/// The input is `to-number` with a 0 fallback so a missing or non-numeric
/// quintile resolves to the neutral color instead of an expression error.
pub fn fill_color_expression() -> Value {
    let mut expr = vec![
        json!("step"),
        json!(["to-number", ["get", QUINTILE_PROPERTY], 0]),
        json!(NEUTRAL_COLOR),
    ];
    for (i, color) in QUINTILE_COLORS.iter().enumerate() {
        expr.push(json!(i + 1));
        expr.push(json!(color));
    }
    Value::Array(expr)
}

/// The color Mapbox will pick for a given quintile value.
///
/// Same semantics as [`fill_color_expression`]: values are floored into the
/// step whose stop they have reached, everything at or above 5 is the top
/// bucket.
pub fn fill_color_for(quintile: Option<f64>) -> &'static str {
    let q = match quintile {
        Some(q) if q.is_finite() => q,
        _ => return NEUTRAL_COLOR,
    };
    QUINTILE_COLORS
        .iter()
        .enumerate()
        .rev()
        .find(|(i, _)| q >= (*i + 1) as f64)
        .map_or(NEUTRAL_COLOR, |(_, c)| *c)
}

pub fn legend_entries() -> [LegendEntry; 5] {
    std::array::from_fn(|i| LegendEntry {
        color: QUINTILE_COLORS[i],
        label: QUINTILE_LABELS[i],
    })
}

pub fn source_spec(data: &FeatureCollection) -> Value {
    json!({
        "type": "geojson",
        "data": data.to_value(),
    })
}

pub fn fill_layer_spec() -> Value {
    json!({
        "id": FILL_LAYER_ID,
        "type": "fill",
        "source": SOURCE_ID,
        "paint": {
            "fill-color": fill_color_expression(),
            "fill-opacity": FILL_OPACITY,
        }
    })
}

pub fn outline_layer_spec() -> Value {
    json!({
        "id": OUTLINE_LAYER_ID,
        "type": "line",
        "source": SOURCE_ID,
        "layout": {},
        "paint": {
            "line-color": OUTLINE_COLOR,
            "line-width": OUTLINE_WIDTH,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_data_keeps_values_as_written() {
        let fc = FeatureCollection::from_json_str(
            r#"{"type":"FeatureCollection","features":[{"type":"Feature","geometry":null,
                "properties":{"TractNameLong":"A","SDQuintile":2.5,"TotalPop":"n/a"}}]}"#,
        )
        .unwrap();

        let props = &source_spec(&fc)["data"]["features"][0]["properties"];
        assert_eq!(props["SDQuintile"], json!(2.5));
        assert_eq!(props["TotalPop"], json!("n/a"));
        // the map paints 2.5 in the second bucket; keep the preview in step
        assert_eq!(fill_color_for(fc.features()[0].properties().risk_value()), QUINTILE_COLORS[1]);
    }

    #[test]
    fn step_expression_has_five_stops() {
        let expr = fill_color_expression();
        assert_eq!(
            expr,
            json!([
                "step",
                ["to-number", ["get", "SDQuintile"], 0],
                "#808080",
                1, "#f8f8f8",
                2, "#f8baba",
                3, "#f87c7c",
                4, "#f83e3e",
                5, "#f80000"
            ])
        );
    }

    #[test]
    fn missing_quintile_is_neutral() {
        assert_eq!(fill_color_for(None), NEUTRAL_COLOR);
        assert_eq!(fill_color_for(Some(0.0)), NEUTRAL_COLOR);
        assert_eq!(fill_color_for(Some(f64::NAN)), NEUTRAL_COLOR);
        assert_eq!(fill_color_for(Some(-3.0)), NEUTRAL_COLOR);
    }

    #[test]
    fn quintiles_map_onto_their_step() {
        assert_eq!(fill_color_for(Some(1.0)), "#f8f8f8");
        assert_eq!(fill_color_for(Some(2.0)), "#f8baba");
        assert_eq!(fill_color_for(Some(3.5)), "#f87c7c");
        assert_eq!(fill_color_for(Some(4.0)), "#f83e3e");
        assert_eq!(fill_color_for(Some(5.0)), "#f80000");
        assert_eq!(fill_color_for(Some(12.0)), "#f80000");
    }

    #[test]
    fn legend_matches_fill_scale() {
        let legend = legend_entries();
        assert_eq!(legend[0], LegendEntry { color: "#f8f8f8", label: "Very Low" });
        assert_eq!(legend[4].label, "Very High");
        for (i, entry) in legend.iter().enumerate() {
            assert_eq!(entry.color, fill_color_for(Some((i + 1) as f64)));
        }
    }

    #[test]
    fn layers_point_at_the_shared_source() {
        assert_eq!(fill_layer_spec()["source"], SOURCE_ID);
        assert_eq!(outline_layer_spec()["source"], SOURCE_ID);
        assert_eq!(fill_layer_spec()["paint"]["fill-opacity"], 0.7);
        assert_eq!(outline_layer_spec()["type"], "line");
    }

    #[test]
    fn source_wraps_the_collection() {
        let fc = FeatureCollection::new(Vec::new());
        let spec = source_spec(&fc);
        assert_eq!(spec["type"], "geojson");
        assert_eq!(spec["data"]["type"], "FeatureCollection");
    }
}
