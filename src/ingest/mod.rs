//! Well record loading and coordinate reprojection.

pub mod projection;
mod wells_csv;

pub use projection::{project_coord, project_to_web_mercator, ProjectionError};
pub use wells_csv::{load_wells, parse_wells, IngestError};
pub use wells_csv::csv_split;
