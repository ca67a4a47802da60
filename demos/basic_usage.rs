//! Basic usage example for riskmap-rs
//!
//! Loads the bundled tract sample and prints what the map and the side panel
//! would show for it.

use riskmap_core::prelude::*;

fn main() -> Result<()> {
    println!("=== riskmap-rs Basic Usage ===\n");

    let tracts = FeatureCollection::load_from_path(FeatureCollection::default_dataset_path())?;
    let stats = tracts.stats();
    println!("✓ Loaded {} tracts", stats.features);
    println!("  Total population: {}", stats.total_population);
    println!();

    println!("--- Legend ---");
    for entry in legend_entries() {
        println!("  {} {}", entry.color, entry.label);
    }
    println!();

    println!("--- Fill color per tract ---");
    for f in tracts.features() {
        let p = f.properties();
        let color = fill_color_for(p.risk_value());
        println!("  {color}  {}", p.name());
    }
    println!();

    println!("--- Detail panel for the first tract ---");
    if let Some(first) = tracts.features().first() {
        println!("{}", DetailView::from_properties(first.properties()).to_html());
    }

    Ok(())
}
