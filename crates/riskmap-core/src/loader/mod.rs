// crates/riskmap-core/src/loader/mod.rs

//! # Data Loader
//!
//! Turns bytes into a [`FeatureCollection`]. The browser fetches the bytes
//! itself and calls [`FeatureCollection::from_json_str`]; native callers go
//! through [`FeatureCollection::load_from_path`], which also handles the
//! physical layer (files, optional gzip).

use crate::error::{Result, RiskMapError};
use crate::model::{FeatureCollection, COLLECTION_KIND};
use std::io::Read;
use std::path::{Path, PathBuf};

mod common_io;

pub use common_io::is_gzip_path;

impl FeatureCollection {
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    pub fn default_dataset_filename() -> &'static str {
        "map.geojson"
    }

    /// The bundled sample collection shipped in `data/`.
    pub fn default_dataset_path() -> PathBuf {
        Self::default_data_dir().join(Self::default_dataset_filename())
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Self::checked(serde_json::from_str(s)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Self::checked(serde_json::from_slice(bytes)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Self::checked(serde_json::from_reader(reader)?)
    }

    /// **Native Loader:** reads a `.geojson` (or `.geojson.gz`) file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading tracts from {}", path.display());

        let reader = common_io::open_stream(path)?;
        let fc = Self::from_reader(reader)?;

        log::info!("loaded {} tracts from {}", fc.len(), path.display());
        Ok(fc)
    }

    fn checked(fc: FeatureCollection) -> Result<Self> {
        if fc.kind != COLLECTION_KIND {
            return Err(RiskMapError::InvalidData(format!(
                "expected a GeoJSON {COLLECTION_KIND}, got type \"{}\"",
                fc.kind
            )));
        }
        Ok(fc)
    }
}
