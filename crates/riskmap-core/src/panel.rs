// crates/riskmap-core/src/panel.rs
//! Detail panel shown when a tract is clicked on the map.
use crate::model::{
    TractProperties, DEVICES_PROPERTY, NAME_PROPERTY, POPULATION_PROPERTY, QUINTILE_PROPERTY,
};
use serde::Serialize;
use std::fmt::Write as _;

/// The four values the panel shows, already formatted as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub name: String,
    pub risk_quintile: String,
    pub total_population: String,
    pub median_device_count: String,
}

impl DetailView {
    pub fn from_properties(p: &TractProperties) -> Self {
        Self {
            name: p.text(NAME_PROPERTY),
            risk_quintile: p.text(QUINTILE_PROPERTY),
            total_population: p.text(POPULATION_PROPERTY),
            median_device_count: p.text(DEVICES_PROPERTY),
        }
    }

    /// Fragment that replaces the panel's content. Values are escaped; the
    /// GeoJSON is not trusted to contain markup.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        let _ = write!(
            html,
            "<h3>{}</h3>\
             <p>Socioeconomic Risk Index: {}</p>\
             <p>Total Population: {}</p>\
             <p>Median Household Devices: {}</p>",
            html_escape(&self.name),
            html_escape(&self.risk_quintile),
            html_escape(&self.total_population),
            html_escape(&self.median_device_count),
        );
        html
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_all_four_attributes() {
        let p = TractProperties::new()
            .with(NAME_PROPERTY, "Census Tract 53")
            .with(QUINTILE_PROPERTY, 4)
            .with(POPULATION_PROPERTY, 4523)
            .with(DEVICES_PROPERTY, 2.5);

        assert_eq!(
            DetailView::from_properties(&p).to_html(),
            "<h3>Census Tract 53</h3>\
             <p>Socioeconomic Risk Index: 4</p>\
             <p>Total Population: 4523</p>\
             <p>Median Household Devices: 2.5</p>"
        );
    }

    #[test]
    fn missing_values_render_blank() {
        let view = DetailView::from_properties(&TractProperties::default());
        assert_eq!(view.name, "");
        assert!(view.to_html().contains("<p>Socioeconomic Risk Index: </p>"));
    }

    #[test]
    fn names_are_escaped() {
        let p = TractProperties::new().with(NAME_PROPERTY, "<b>Ballard & Fremont</b>");
        let html = DetailView::from_properties(&p).to_html();
        assert!(html.starts_with("<h3>&lt;b&gt;Ballard &amp; Fremont&lt;/b&gt;</h3>"));
    }

    #[test]
    fn unreadable_values_are_shown_as_written() {
        let p = TractProperties::new()
            .with(QUINTILE_PROPERTY, 2.5)
            .with(POPULATION_PROPERTY, "n/a");
        let view = DetailView::from_properties(&p);
        assert_eq!(view.risk_quintile, "2.5");
        assert_eq!(view.total_population, "n/a");
        assert_eq!(view.median_device_count, "");
    }
}
