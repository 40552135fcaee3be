//! Orphan well input table.
//!
//! The table is a plain CSV with a header row. Required columns:
//! `API`, `WELL_NAME`, `SH_LON`, `SH_LAT`, `COUNTY`. Optional columns:
//! `completion_year`, `surface_casing_ft`, `domestic_wells_1km`. Header
//! matching is case-insensitive and tolerates a few common aliases.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::projection::{project_to_web_mercator, ProjectionError};
use crate::types::WellRecord;

/// Failure to read the well table. Always fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Empty well table: {0}")]
    Empty(String),

    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Line {line}: {message}")]
    Row { line: usize, message: String },

    #[error("Line {line}: {source}")]
    Projection {
        line: usize,
        #[source]
        source: ProjectionError,
    },

    #[error("Line {line}: duplicate API number {api}")]
    DuplicateApi { line: usize, api: u64 },
}

// ============================================================================
// CSV Quote-Aware Parsing
// ============================================================================

/// Split a CSV line respecting quoted fields (handles commas inside quotes).
/// Returns owned strings because quoted fields need unquoting.
pub fn csv_split(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    // Escaped quote ("")
                    if chars.peek() == Some(&'"') {
                        current.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => {
                fields.push(current.clone());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

// ============================================================================
// Column Mapping
// ============================================================================

/// Maps header names to column indices.
#[derive(Debug, Clone, Default)]
struct ColumnMap {
    api: Option<usize>,
    name: Option<usize>,
    lon: Option<usize>,
    lat: Option<usize>,
    county: Option<usize>,
    completion_year: Option<usize>,
    casing: Option<usize>,
    domestic_wells: Option<usize>,
}

impl ColumnMap {
    fn from_header(header: &str) -> Self {
        let mut map = Self::default();
        for (idx, col) in csv_split(header).iter().enumerate() {
            let col_upper = col.trim().trim_start_matches('\u{feff}').to_uppercase();
            match col_upper.as_str() {
                "API" | "API_NUMBER" | "API_NO" => map.api = Some(idx),
                "WELL_NAME" | "NAME" => map.name = Some(idx),
                "SH_LON" | "LON" | "LONGITUDE" => map.lon = Some(idx),
                "SH_LAT" | "LAT" | "LATITUDE" => map.lat = Some(idx),
                "COUNTY" => map.county = Some(idx),
                "COMPLETION_YEAR" | "COMPLETION_YR" => map.completion_year = Some(idx),
                "SURFACE_CASING_FT" | "SURF_CASING_FT" => map.casing = Some(idx),
                "DOMESTIC_WELLS_1KM" => map.domestic_wells = Some(idx),
                _ => {}
            }
        }
        map
    }

    /// Check that the required columns are present.
    fn validate(&self) -> Result<(), IngestError> {
        let required = [
            (self.api, "API"),
            (self.name, "WELL_NAME"),
            (self.lon, "SH_LON"),
            (self.lat, "SH_LAT"),
            (self.county, "COUNTY"),
        ];
        for (idx, name) in required {
            if idx.is_none() {
                return Err(IngestError::MissingColumn(name));
            }
        }
        Ok(())
    }

    /// Report which optional columns were found.
    fn summary(&self) -> String {
        let mut missing: Vec<&str> = Vec::new();
        if self.completion_year.is_none() {
            missing.push("completion_year");
        }
        if self.casing.is_none() {
            missing.push("surface_casing_ft");
        }
        if self.domestic_wells.is_none() {
            missing.push("domestic_wells_1km");
        }
        if missing.is_empty() {
            "All well columns present".to_string()
        } else {
            format!("Optional columns absent: {}", missing.join(", "))
        }
    }
}

// ============================================================================
// Field Parsing
// ============================================================================

fn cell<'a>(fields: &'a [String], idx: Option<usize>) -> Option<&'a str> {
    idx.and_then(|i| fields.get(i)).map(|s| s.trim())
}

/// Blank, `NaN`, `NA` and `null` all mean "not recorded".
fn is_missing(raw: &str) -> bool {
    raw.is_empty()
        || raw.eq_ignore_ascii_case("nan")
        || raw.eq_ignore_ascii_case("na")
        || raw.eq_ignore_ascii_case("null")
}

fn required<'a>(
    fields: &'a [String],
    idx: Option<usize>,
    column: &str,
    line: usize,
) -> Result<&'a str, IngestError> {
    match cell(fields, idx) {
        Some(raw) if !is_missing(raw) => Ok(raw),
        _ => Err(IngestError::Row {
            line,
            message: format!("missing value for required column {column}"),
        }),
    }
}

fn parse_f64(raw: &str, column: &str, line: usize) -> Result<f64, IngestError> {
    raw.parse::<f64>().map_err(|_| IngestError::Row {
        line,
        message: format!("{column} = '{raw}' is not a number"),
    })
}

/// Whole numbers may arrive as `1982` or `1982.0` (spreadsheet exports).
fn parse_whole(raw: &str, column: &str, line: usize) -> Result<f64, IngestError> {
    let value = parse_f64(raw, column, line)?;
    if value.fract() != 0.0 || !value.is_finite() {
        return Err(IngestError::Row {
            line,
            message: format!("{column} = '{raw}' is not a whole number"),
        });
    }
    Ok(value)
}

fn optional_f64(
    fields: &[String],
    idx: Option<usize>,
    column: &str,
    line: usize,
) -> Result<Option<f64>, IngestError> {
    match cell(fields, idx) {
        Some(raw) if !is_missing(raw) => parse_f64(raw, column, line).map(Some),
        _ => Ok(None),
    }
}

fn optional_whole(
    fields: &[String],
    idx: Option<usize>,
    column: &str,
    line: usize,
) -> Result<Option<f64>, IngestError> {
    match cell(fields, idx) {
        Some(raw) if !is_missing(raw) => parse_whole(raw, column, line).map(Some),
        _ => Ok(None),
    }
}

/// Narrow a parsed whole number to the column's integer type.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn whole_to<T: TryFrom<i64>>(value: f64, column: &str, line: usize) -> Result<T, IngestError> {
    let out_of_range = || IngestError::Row {
        line,
        message: format!("{column} = {value} is out of range"),
    };
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(out_of_range());
    }
    T::try_from(value as i64).map_err(|_| out_of_range())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_row(fields: &[String], map: &ColumnMap, line: usize) -> Result<WellRecord, IngestError> {
    let api_raw = required(fields, map.api, "API", line)?;
    let api = parse_whole(api_raw, "API", line)?;
    if api <= 0.0 || api > u64::MAX as f64 {
        return Err(IngestError::Row {
            line,
            message: format!("API = '{api_raw}' is not a valid well number"),
        });
    }

    let longitude = parse_f64(required(fields, map.lon, "SH_LON", line)?, "SH_LON", line)?;
    let latitude = parse_f64(required(fields, map.lat, "SH_LAT", line)?, "SH_LAT", line)?;
    let location = project_to_web_mercator(longitude, latitude)
        .map_err(|source| IngestError::Projection { line, source })?;

    let completion_year: Option<i32> =
        optional_whole(fields, map.completion_year, "completion_year", line)?
            .map(|y| whole_to(y, "completion_year", line))
            .transpose()?;
    let domestic_wells = optional_whole(fields, map.domestic_wells, "domestic_wells_1km", line)?;
    if domestic_wells.is_some_and(|n| n < 0.0) {
        return Err(IngestError::Row {
            line,
            message: "domestic_wells_1km cannot be negative".to_string(),
        });
    }
    let domestic_wells: Option<u32> = domestic_wells
        .map(|n| whole_to(n, "domestic_wells_1km", line))
        .transpose()?;
    let surface_casing_ft = optional_f64(fields, map.casing, "surface_casing_ft", line)?;
    if surface_casing_ft.is_some_and(|ft| ft < 0.0 || !ft.is_finite()) {
        return Err(IngestError::Row {
            line,
            message: "surface_casing_ft must be a non-negative number".to_string(),
        });
    }

    Ok(WellRecord {
        api: api as u64,
        name: required(fields, map.name, "WELL_NAME", line)?.to_string(),
        county: required(fields, map.county, "COUNTY", line)?.to_string(),
        longitude,
        latitude,
        location,
        completion_year,
        surface_casing_ft,
        domestic_wells_1km: domestic_wells,
    })
}

// ============================================================================
// Loader
// ============================================================================

/// Read and project every well in the table.
///
/// Any malformed row aborts the load: a silently dropped well would leave
/// a gap in the summary that nothing downstream could detect.
pub fn load_wells(path: impl AsRef<Path>) -> Result<Vec<WellRecord>, IngestError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path_str.clone(),
        source,
    })?;
    parse_wells(BufReader::new(file), &path_str)
}

/// Parse a well table from any buffered reader.
pub fn parse_wells(reader: impl BufRead, source_name: &str) -> Result<Vec<WellRecord>, IngestError> {
    let mut lines = reader.lines();

    let header_line = lines
        .next()
        .ok_or_else(|| IngestError::Empty(source_name.to_string()))?
        .map_err(|source| IngestError::Io {
            path: source_name.to_string(),
            source,
        })?;

    let col_map = ColumnMap::from_header(&header_line);
    col_map.validate()?;
    tracing::info!(file = %source_name, "{}", col_map.summary());

    let mut wells = Vec::new();
    let mut seen = HashSet::new();

    for (offset, line_result) in lines.enumerate() {
        let line_num = offset + 2;
        let line = line_result.map_err(|source| IngestError::Io {
            path: source_name.to_string(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let fields = csv_split(&line);
        let well = parse_row(&fields, &col_map, line_num)?;
        if !seen.insert(well.api) {
            return Err(IngestError::DuplicateApi {
                line: line_num,
                api: well.api,
            });
        }
        wells.push(well);
    }

    if wells.is_empty() {
        return Err(IngestError::Empty(source_name.to_string()));
    }

    tracing::info!(file = %source_name, wells = wells.len(), "Loaded well table");
    Ok(wells)
}
