//! riskmap-cli — Command-line inspector for riskmap-core
//!
//! Looks at the same tract GeoJSON the browser map loads, without a
//! browser: summary counts, the side-panel table (sorted exactly like a
//! header click would sort it), the detail fragment of one tract, and the
//! layer definitions sent to Mapbox.
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ riskmap stats
//!
//! - Table sorted by population, largest first
//!   $ riskmap table --sort population --desc
//!
//! - Detail fragment of the third tract of a custom file
//!   $ riskmap --input data/map.geojson detail 2
//!
//! - Layer JSON
//!   $ riskmap layers
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use riskmap_core::prelude::*;
use riskmap_core::style;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    // Determine input file (default sample inside riskmap-core)
    let input_path = args.input.unwrap_or_else(|| {
        FeatureCollection::default_dataset_path()
            .to_string_lossy()
            .to_string()
    });

    let tracts = FeatureCollection::load_from_path(&input_path)
        .with_context(|| format!("loading {input_path}"))?;

    match args.command {
        Commands::Stats => {
            let stats = tracts.stats();
            println!("Tract statistics:");
            println!("  Features: {}", stats.features);
            for (q, count) in stats.by_quintile.iter().enumerate() {
                println!(
                    "  Quintile {q}: {count} ({})",
                    style::fill_color_for(Some(q as f64))
                );
            }
            println!("  No quintile: {}", stats.unbucketed);
            println!("  Total population: {}", stats.total_population);
        }

        Commands::Table { sort, desc } => {
            let mut rows = build_rows(&tracts);
            if let Some(column) = sort {
                let column: Column = column.parse()?;
                let direction = SortDirection::from_ascending(!desc);
                log::debug!("sorting by {column} ({direction:?})");
                sort_rows(&mut rows, column, direction);
            }
            println!("{}", Row::heading().cells().join("\t"));
            for row in rows {
                println!("{}", row.cells().join("\t"));
            }
        }

        Commands::Detail { index } => match tracts.features().get(index) {
            Some(f) => println!("{}", DetailView::from_properties(f.properties()).to_html()),
            None => {
                eprintln!("No feature at index {index} ({} features)", tracts.len());
            }
        },

        Commands::Layers => {
            println!("source \"{}\": geojson <- {input_path}", style::SOURCE_ID);
            for layer in [style::fill_layer_spec(), style::outline_layer_spec()] {
                println!("{}", serde_json::to_string_pretty(&layer)?);
            }
        }
    }

    Ok(())
}
