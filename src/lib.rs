//! riskmap-rs — workspace umbrella crate.
//!
//! Re-exports [`riskmap_core`] so the demos under `demos/` can be run from
//! the workspace root (`cargo run --example basic_usage`).
pub use riskmap_core::*;
