//! riskmap-cli
//! ===========
//!
//! Command-line inspector for the census-tract GeoJSON rendered by the
//! `riskmap-wasm` choropleth.
//!
//! This crate primarily provides a binary (`riskmap-cli`). We include a small
//! library target so that docs.rs renders a documentation page and shows this
//! overview.
//!
//! Basic usage:
//!
//! ```text
//! riskmap-cli --help
//! riskmap-cli stats
//! riskmap-cli table --sort risk --desc
//! riskmap-cli detail 0
//! riskmap-cli layers
//! ```
//!
//! For programmatic access to the model, layer styling and table sorting, use
//! the [`riskmap-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]

// This library target intentionally exposes no API; the binary is the primary
// deliverable. The presence of this file enables a rendered page on docs.rs.
