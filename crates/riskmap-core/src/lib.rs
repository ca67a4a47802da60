// crates/riskmap-core/src/lib.rs
//! riskmap-core
//! ============
//!
//! The DOM-free half of the census-tract risk map: reading the tract
//! GeoJSON, the Mapbox source/layer definitions and their install order,
//! the detail panel fragment, and the sortable side-panel table.
//!
//! Nothing in here touches a browser. `riskmap-wasm` wires these pieces to
//! Mapbox GL and the page; `riskmap-cli` prints them in a terminal.
//!
//! ```no_run
//! use riskmap_core::prelude::*;
//!
//! let tracts = FeatureCollection::load_from_path(FeatureCollection::default_dataset_path())?;
//! let mut table = SortableTable::new(PinnedTable::new(Row::heading(), build_rows(&tracts)));
//! table.click_header(Column::Population); // ascending
//! # Ok::<(), riskmap_core::RiskMapError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod binding;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod panel;
pub mod style;
pub mod table;
pub mod widgets;

// Re-exports
pub use crate::error::{Result, RiskMapError};
pub use crate::model::{CollectionStats, Feature, FeatureCollection, TractProperties};

pub mod prelude {
    pub use crate::binding::{InstallOutcome, LayerInstaller, MapSurface};
    pub use crate::config::{DomIds, MapConfig};
    pub use crate::error::{Result, RiskMapError};
    pub use crate::model::{CollectionStats, Feature, FeatureCollection, TractProperties};
    pub use crate::panel::DetailView;
    pub use crate::style::{fill_color_for, legend_entries, LegendEntry};
    pub use crate::table::{
        build_rows, sort_rows, CellText, Column, PinnedTable, Row, SortDirection, SortToggles,
        SortableTable,
    };
    pub use crate::widgets::{popup_toggle_plan, NavState, Popup, VisibilityChange};
}
