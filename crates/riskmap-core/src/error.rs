// crates/riskmap-core/src/error.rs
use thiserror::Error;

/// Everything that can go wrong between reading the tract file and putting it
/// on screen.
///
/// Only the load path is expected to fail in practice; the DOM and JS
/// variants exist so the browser adapter can report instead of panicking.
#[derive(Debug, Error)]
pub enum RiskMapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Non-2xx HTTP status from the data fetch.
    #[error("Network response was not ok (HTTP {0})")]
    Status(u16),

    /// A rejected promise or thrown exception from the JS side.
    #[error("JavaScript error: {0}")]
    Js(String),

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("Unknown table column index {0}")]
    UnknownColumn(usize),
}

pub type Result<T> = std::result::Result<T, RiskMapError>;
