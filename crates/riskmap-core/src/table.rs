// crates/riskmap-core/src/table.rs
//! # Tract Table
//!
//! The side-panel table: one [`Row`] per feature, four text cells, and a
//! click-to-sort heading row that never moves.
//!
//! Sorting is expressed over the [`CellText`] trait rather than over `Row`
//! directly, so the browser can sort its DOM row handles with the exact same
//! ordering the CLI and the tests use.
//!
//! Ordering rules
//! --------------
//! - `Name` compares as text (byte-wise, case-sensitive).
//! - The other columns parse the cell as `f64`. Cells that are empty or
//!   don't parse sort *after* every number, whichever the direction.
//! - Sorting is stable: rows with equal keys keep their current order.
use crate::error::{Result, RiskMapError};
use crate::model::{
    FeatureCollection, TractProperties, DEVICES_PROPERTY, NAME_PROPERTY, POPULATION_PROPERTY,
    QUINTILE_PROPERTY,
};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub const COLUMN_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Column {
    Name,
    RiskQuintile,
    Population,
    DeviceCount,
}

impl Column {
    /// Display order, left to right.
    pub const ALL: [Column; COLUMN_COUNT] = [
        Column::Name,
        Column::RiskQuintile,
        Column::Population,
        Column::DeviceCount,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Result<Self> {
        Self::ALL
            .get(i)
            .copied()
            .ok_or(RiskMapError::UnknownColumn(i))
    }

    pub fn heading(self) -> &'static str {
        match self {
            Column::Name => "Area",
            Column::RiskQuintile => "Risk Factor",
            Column::Population => "Total Population",
            Column::DeviceCount => "Devices",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, Column::Name)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}

impl FromStr for Column {
    type Err = RiskMapError;

    /// Accepts a column index (`0`..`3`) or a short name.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(i) = s.parse::<usize>() {
            return Self::from_index(i);
        }
        match s.to_ascii_lowercase().as_str() {
            "name" | "area" | "tract" => Ok(Column::Name),
            "risk" | "quintile" => Ok(Column::RiskQuintile),
            "population" | "pop" => Ok(Column::Population),
            "devices" | "device" => Ok(Column::DeviceCount),
            other => Err(RiskMapError::InvalidData(format!("unknown column \"{other}\""))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        }
    }

    pub fn is_ascending(self) -> bool {
        self == SortDirection::Ascending
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Font Awesome class for a heading that isn't the active sort column.
pub const ICON_UNSORTED: &str = "fa fa-fw fa-sort";

/// One ascending/descending flag per column, starting at `false`.
///
/// Every header click flips that column's flag and nothing else, so the
/// first click on a column sorts ascending, the second descending, and so on.
/// Flags are never reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortToggles {
    ascending: [bool; COLUMN_COUNT],
    active: Option<Column>,
}

impl SortToggles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, column: Column) -> SortDirection {
        let flag = &mut self.ascending[column.index()];
        *flag = !*flag;
        self.active = Some(column);
        SortDirection::from_ascending(*flag)
    }

    pub fn is_ascending(&self, column: Column) -> bool {
        self.ascending[column.index()]
    }

    /// The column last clicked, if any.
    pub fn active(&self) -> Option<Column> {
        self.active
    }

    pub fn icon_class(&self, column: Column) -> &'static str {
        match self.active {
            Some(c) if c == column => {
                if self.is_ascending(column) {
                    "fa fa-fw fa-sort-up"
                } else {
                    "fa fa-fw fa-sort-down"
                }
            }
            _ => ICON_UNSORTED,
        }
    }
}

// -----------------------------------------------------------------------------
// Rows
// -----------------------------------------------------------------------------

/// Anything that can show the text of a table cell.
pub trait CellText {
    fn cell_text(&self, column: Column) -> &str;
}

/// One feature projected onto the four table columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    cells: [String; COLUMN_COUNT],
}

impl Row {
    pub fn new(cells: [String; COLUMN_COUNT]) -> Self {
        Self { cells }
    }

    pub fn from_properties(p: &TractProperties) -> Self {
        Self::new([
            p.text(NAME_PROPERTY),
            p.text(QUINTILE_PROPERTY),
            p.text(POPULATION_PROPERTY),
            p.text(DEVICES_PROPERTY),
        ])
    }

    pub fn cells(&self) -> &[String; COLUMN_COUNT] {
        &self.cells
    }

    /// The heading row, for consumers that render the table themselves.
    pub fn heading() -> Self {
        Self::new(Column::ALL.map(|c| c.heading().to_string()))
    }
}

impl CellText for Row {
    fn cell_text(&self, column: Column) -> &str {
        &self.cells[column.index()]
    }
}

/// Exactly one row per feature, in collection order.
pub fn build_rows(data: &FeatureCollection) -> Vec<Row> {
    data.features()
        .iter()
        .map(|f| Row::from_properties(f.properties()))
        .collect()
}

// -----------------------------------------------------------------------------
// Sorting
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortKey<'a> {
    Text(&'a str),
    /// `None` when the cell is empty or not a number.
    Number(Option<f64>),
}

impl<'a> SortKey<'a> {
    pub fn of<R: CellText + ?Sized>(row: &'a R, column: Column) -> Self {
        let text = row.cell_text(column);
        if column.is_numeric() {
            SortKey::Number(parse_numeric(text))
        } else {
            SortKey::Text(text)
        }
    }

    fn compare(&self, other: &Self, direction: SortDirection) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => direction.apply(a.cmp(b)),
            (SortKey::Number(a), SortKey::Number(b)) => match (a, b) {
                (Some(a), Some(b)) => direction.apply(a.total_cmp(b)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            // Keys of one column always share a variant.
            _ => Ordering::Equal,
        }
    }
}

fn parse_numeric(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|f| !f.is_nan())
}

/// Stable sort of `rows` by one column.
pub fn sort_rows<R: CellText>(rows: &mut [R], column: Column, direction: SortDirection) {
    rows.sort_by(|a, b| SortKey::of(a, column).compare(&SortKey::of(b, column), direction));
}

/// A heading row plus body rows. Only the body is ever reordered.
#[derive(Debug, Clone, PartialEq)]
pub struct PinnedTable<R> {
    header: R,
    body: Vec<R>,
}

impl<R> PinnedTable<R> {
    pub fn new(header: R, body: Vec<R>) -> Self {
        Self { header, body }
    }

    pub fn header(&self) -> &R {
        &self.header
    }

    pub fn body(&self) -> &[R] {
        &self.body
    }

    /// Heading first, then the body in current order.
    pub fn rows(&self) -> impl Iterator<Item = &R> + '_ {
        std::iter::once(&self.header).chain(self.body.iter())
    }
}

impl<R: CellText> PinnedTable<R> {
    pub fn sort(&mut self, column: Column, direction: SortDirection) {
        sort_rows(&mut self.body, column, direction);
    }
}

/// A [`PinnedTable`] together with its per-column toggle state: the whole
/// click-to-sort behavior of the side panel.
#[derive(Debug, Clone)]
pub struct SortableTable<R> {
    table: PinnedTable<R>,
    toggles: SortToggles,
}

impl<R: CellText> SortableTable<R> {
    pub fn new(table: PinnedTable<R>) -> Self {
        Self {
            table,
            toggles: SortToggles::new(),
        }
    }

    /// Flip the column's direction and re-sort the body with it.
    pub fn click_header(&mut self, column: Column) -> SortDirection {
        let direction = self.toggles.toggle(column);
        self.table.sort(column, direction);
        direction
    }

    pub fn table(&self) -> &PinnedTable<R> {
        &self.table
    }

    pub fn toggles(&self) -> &SortToggles {
        &self.toggles
    }
}
