//! Shared data structures for the orphan well screening pipeline
//!
//! - `WellRecord`: one row of the static input table, projected to EPSG:3857
//! - `DomesticWell`: a synthetic receptor point tied to its orphan well
//! - `WellRiskRecord`: the write-once output consumed by every report writer

mod risk;
mod well;

pub use risk::*;
pub use well::*;
