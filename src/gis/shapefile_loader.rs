//! Shapefile reading and conversion into `geo` geometries.

use std::path::{Path, PathBuf};

use geo::{Coord, LineString, Polygon};
use shapefile::{PolygonRing, Shape};

use super::GisLayers;
use crate::config::{DataConfig, LayerSource, SourceCrs};
use crate::ingest::{project_coord, ProjectionError};

/// Fatal problem with a GIS layer. Any of these aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum LayerError {
    #[error("Shapefile not found: {0}")]
    Missing(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: shapefile::Error,
    },

    #[error("{path} holds {found} shapes, expected {expected}")]
    UnexpectedShape {
        path: PathBuf,
        found: String,
        expected: &'static str,
    },

    #[error("Layer '{0}' has no features")]
    Empty(&'static str),

    #[error("{path}: {source}")]
    Projection {
        path: PathBuf,
        #[source]
        source: ProjectionError,
    },
}

/// Load the aquifer and flowline layers named in the data config.
///
/// Flowlines may be split over several shapefiles; every part is read and
/// concatenated.
pub fn load_layers(data: &DataConfig) -> Result<GisLayers, LayerError> {
    let aquifers = load_source(&data.aquifers, &data.data_dir, read_polygons)?;
    if aquifers.is_empty() {
        return Err(LayerError::Empty("aquifers"));
    }

    let flowlines = load_source(&data.flowlines, &data.data_dir, read_flowlines)?;
    if flowlines.is_empty() {
        return Err(LayerError::Empty("flowlines"));
    }

    tracing::info!(
        aquifer_polygons = aquifers.len(),
        flowlines = flowlines.len(),
        "GIS layers loaded"
    );
    Ok(GisLayers::new(aquifers, flowlines))
}

fn load_source<T>(
    source: &LayerSource,
    data_dir: &Path,
    read: fn(&Path, SourceCrs) -> Result<Vec<T>, LayerError>,
) -> Result<Vec<T>, LayerError> {
    let mut features = Vec::new();
    for path in source.shapefile_paths(data_dir) {
        let part = read(&path, source.crs)?;
        tracing::debug!(file = %path.display(), features = part.len(), "Read shapefile");
        features.extend(part);
    }
    Ok(features)
}

fn read_shapes(path: &Path) -> Result<Vec<Shape>, LayerError> {
    if !path.exists() {
        return Err(LayerError::Missing(path.to_path_buf()));
    }
    shapefile::read_shapes(path).map_err(|source| LayerError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn to_coord(x: f64, y: f64, crs: SourceCrs, path: &Path) -> Result<Coord<f64>, LayerError> {
    match crs {
        SourceCrs::WebMercator => Ok(Coord { x, y }),
        SourceCrs::Wgs84 => project_coord(x, y).map_err(|source| LayerError::Projection {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn to_line(
    points: impl Iterator<Item = (f64, f64)>,
    crs: SourceCrs,
    path: &Path,
) -> Result<LineString<f64>, LayerError> {
    points
        .map(|(x, y)| to_coord(x, y, crs, path))
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::new)
}

/// Group shapefile rings into polygons: each outer ring opens a new polygon
/// and inner rings attach to the most recent outer ring.
fn rings_to_polygons<P>(
    rings: &[PolygonRing<P>],
    xy: impl Fn(&P) -> (f64, f64),
    crs: SourceCrs,
    path: &Path,
    out: &mut Vec<Polygon<f64>>,
) -> Result<(), LayerError> {
    let mut exterior: Option<LineString<f64>> = None;
    let mut interiors: Vec<LineString<f64>> = Vec::new();

    for ring in rings {
        let line = to_line(ring.points().iter().map(&xy), crs, path)?;
        match ring {
            PolygonRing::Outer(_) => {
                if let Some(prev) = exterior.take() {
                    out.push(Polygon::new(prev, std::mem::take(&mut interiors)));
                }
                exterior = Some(line);
            }
            PolygonRing::Inner(_) => interiors.push(line),
        }
    }
    if let Some(prev) = exterior {
        out.push(Polygon::new(prev, interiors));
    }
    Ok(())
}

/// Read every polygon in a shapefile. Null shapes are skipped.
pub fn read_polygons(path: &Path, crs: SourceCrs) -> Result<Vec<Polygon<f64>>, LayerError> {
    let mut polygons = Vec::new();
    for shape in read_shapes(path)? {
        match shape {
            Shape::Polygon(p) => rings_to_polygons(p.rings(), |pt| (pt.x, pt.y), crs, path, &mut polygons)?,
            Shape::PolygonM(p) => rings_to_polygons(p.rings(), |pt| (pt.x, pt.y), crs, path, &mut polygons)?,
            Shape::PolygonZ(p) => rings_to_polygons(p.rings(), |pt| (pt.x, pt.y), crs, path, &mut polygons)?,
            Shape::NullShape => {}
            other => {
                return Err(LayerError::UnexpectedShape {
                    path: path.to_path_buf(),
                    found: format!("{:?}", other.shapetype()),
                    expected: "polygon",
                })
            }
        }
    }
    Ok(polygons)
}

/// Read every polyline part in a shapefile as its own line string.
pub fn read_flowlines(path: &Path, crs: SourceCrs) -> Result<Vec<LineString<f64>>, LayerError> {
    let mut lines = Vec::new();
    for shape in read_shapes(path)? {
        match shape {
            Shape::Polyline(l) => {
                for part in l.parts() {
                    lines.push(to_line(part.iter().map(|pt| (pt.x, pt.y)), crs, path)?);
                }
            }
            Shape::PolylineM(l) => {
                for part in l.parts() {
                    lines.push(to_line(part.iter().map(|pt| (pt.x, pt.y)), crs, path)?);
                }
            }
            Shape::PolylineZ(l) => {
                for part in l.parts() {
                    lines.push(to_line(part.iter().map(|pt| (pt.x, pt.y)), crs, path)?);
                }
            }
            Shape::NullShape => {}
            other => {
                return Err(LayerError::UnexpectedShape {
                    path: path.to_path_buf(),
                    found: format!("{:?}", other.shapetype()),
                    expected: "polyline",
                })
            }
        }
    }
    Ok(lines)
}
