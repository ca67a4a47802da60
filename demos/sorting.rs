//! Table sorting example for riskmap-rs
//!
//! Mimics clicking the side-panel headings: each click flips that column's
//! direction, the heading row never moves.

use riskmap_core::prelude::*;

fn print(table: &PinnedTable<Row>) {
    for row in table.rows() {
        println!("  {}", row.cells().join(" | "));
    }
    println!();
}

fn main() -> Result<()> {
    let tracts = FeatureCollection::load_from_path(FeatureCollection::default_dataset_path())?;
    let mut table = SortableTable::new(PinnedTable::new(Row::heading(), build_rows(&tracts)));

    let clicks = [
        Column::Population,
        Column::Population,
        Column::Name,
        Column::RiskQuintile,
    ];
    for column in clicks {
        let direction = table.click_header(column);
        println!("--- {column}: {direction:?} ---");
        print(table.table());
    }

    Ok(())
}
