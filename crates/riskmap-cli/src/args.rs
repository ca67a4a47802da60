use clap::{Parser, Subcommand};

/// CLI arguments for riskmap-cli
#[derive(Debug, Parser)]
#[command(
    name = "riskmap",
    version,
    about = "Inspect the census-tract GeoJSON behind the risk choropleth"
)]
pub struct CliArgs {
    /// Path to the tract GeoJSON (.geojson or .geojson.gz; default: bundled sample)
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<String>,

    /// Log more (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show feature count, quintile histogram and total population
    Stats,

    /// Print the side-panel table, tab-separated
    Table {
        /// Column to sort by: name, risk, population, devices (or 0-3)
        #[arg(short = 's', long = "sort")]
        sort: Option<String>,

        /// Sort descending instead of ascending
        #[arg(short = 'd', long = "desc", requires = "sort")]
        desc: bool,
    },

    /// Print the detail-panel HTML for one feature
    Detail {
        /// Position of the feature in the collection (0-based)
        index: usize,
    },

    /// Print the source and layer JSON handed to Mapbox GL
    Layers,
}
