//! # Data Loader
//!
//! Reads the housing inventory CSV and the SPA boundary GeoJSON. Region
//! codes are kept as raw text and resolved through the supplied
//! [`RegionLookup`]; unresolved codes are logged once per file and carried
//! forward as `region: None`.
//!
//! Required CSV columns: `SPA`, `Housing Type`, `Utilization Rate`,
//! `PIT Count`, `Total Beds`. Other columns are ignored.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use geojson::GeoJson;
use serde::Deserialize;
use spa_core::{BedRecord, RegionBoundary, RegionLookup};

use crate::error::LoadError;

pub const SPA_COLUMN: &str = "SPA";
pub const HOUSING_TYPE_COLUMN: &str = "Housing Type";
pub const UTILIZATION_RATE_COLUMN: &str = "Utilization Rate";
pub const PIT_COUNT_COLUMN: &str = "PIT Count";
pub const TOTAL_BEDS_COLUMN: &str = "Total Beds";

const REQUIRED_COLUMNS: [&str; 5] = [
    SPA_COLUMN,
    HOUSING_TYPE_COLUMN,
    UTILIZATION_RATE_COLUMN,
    PIT_COUNT_COLUMN,
    TOTAL_BEDS_COLUMN,
];

/// One CSV row before numeric parsing and region resolution.
#[derive(Debug, Deserialize)]
struct RawBedRow {
    #[serde(rename = "SPA")]
    spa: Option<String>,
    #[serde(rename = "Housing Type")]
    housing_type: Option<String>,
    #[serde(rename = "Utilization Rate")]
    utilization_rate: Option<String>,
    #[serde(rename = "PIT Count")]
    pit_count: Option<String>,
    #[serde(rename = "Total Beds")]
    total_beds: Option<String>,
}

/// Load bed records from a CSV file on disk.
pub fn load_bed_records(path: &Path, lookup: &RegionLookup) -> Result<Vec<BedRecord>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_bed_records(file, lookup)?;
    tracing::info!(path = %path.display(), records = records.len(), "loaded bed records");
    Ok(records)
}

/// Decode bed records from any CSV source.
pub fn read_bed_records<R: Read>(
    reader: R,
    lookup: &RegionLookup,
) -> Result<Vec<BedRecord>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    let mut unresolved = BTreeSet::new();

    for result in rdr.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let raw: RawBedRow = row.deserialize(Some(&headers))?;

        let code = raw.spa.unwrap_or_default();
        let region = lookup.resolve(&code);
        if region.is_none() {
            unresolved.insert(code.clone());
        }

        let mut record = BedRecord {
            code,
            region,
            housing_type: raw.housing_type,
            total_beds: parse_count(raw.total_beds.as_deref(), TOTAL_BEDS_COLUMN, line)?,
            pit_count: parse_count(raw.pit_count.as_deref(), PIT_COUNT_COLUMN, line)?,
            utilization_rate: parse_rate(raw.utilization_rate.as_deref(), line)?,
        };
        if record.utilization_rate.is_none() {
            record.utilization_rate = record.derived_utilization();
        }
        records.push(record);
    }

    if !unresolved.is_empty() {
        tracing::warn!(
            codes = ?unresolved,
            "bed records with region codes outside the lookup table; they are excluded from region groups"
        );
    }

    Ok(records)
}

/// Load region boundaries from a GeoJSON file on disk.
pub fn load_boundaries(
    path: &Path,
    lookup: &RegionLookup,
) -> Result<Vec<RegionBoundary>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let boundaries = parse_boundaries(&text, lookup)?;
    tracing::info!(path = %path.display(), boundaries = boundaries.len(), "loaded region boundaries");
    Ok(boundaries)
}

/// Decode region boundaries from GeoJSON text.
///
/// The root must be a FeatureCollection. Each feature needs an `SPA`
/// property and a geometry; numeric codes are converted using their JSON
/// text form, so `1` becomes `"1"` and `1.0` becomes `"1.0"`.
pub fn parse_boundaries(
    text: &str,
    lookup: &RegionLookup,
) -> Result<Vec<RegionBoundary>, LoadError> {
    let collection = match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection,
        _ => return Err(LoadError::NotFeatureCollection),
    };

    let mut boundaries = Vec::with_capacity(collection.features.len());
    let mut unresolved = BTreeSet::new();

    for (index, feature) in collection.features.into_iter().enumerate() {
        let code = match feature.property(SPA_COLUMN) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Null) | None => {
                return Err(LoadError::MissingProperty {
                    feature: index,
                    property: SPA_COLUMN,
                })
            }
            Some(other) => other.to_string(),
        };
        let geometry = feature
            .geometry
            .ok_or(LoadError::MissingGeometry { feature: index })?;

        let region = lookup.resolve(&code);
        if region.is_none() {
            unresolved.insert(code.clone());
        }
        boundaries.push(RegionBoundary {
            code,
            region,
            geometry,
        });
    }

    if !unresolved.is_empty() {
        tracing::warn!(codes = ?unresolved, "boundaries with region codes outside the lookup table");
    }

    Ok(boundaries)
}

fn parse_number(value: Option<&str>, column: &'static str, line: u64) -> Result<Option<f64>, LoadError> {
    let Some(text) = value.filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(LoadError::InvalidNumber {
            line,
            column,
            value: text.to_string(),
        }),
    }
}

fn parse_rate(value: Option<&str>, line: u64) -> Result<Option<f64>, LoadError> {
    parse_number(value, UTILIZATION_RATE_COLUMN, line)
}

/// Counts must be non-negative whole numbers; `80` and `80.0` both parse.
/// Parsed as integers so counts above 2^53 stay exact.
fn parse_count(value: Option<&str>, column: &'static str, line: u64) -> Result<Option<u64>, LoadError> {
    let Some(text) = value.filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let whole = match text.split_once('.') {
        Some((whole, fraction)) if fraction.bytes().all(|b| b == b'0') => whole,
        Some(_) => "",
        None => text,
    };
    whole.parse::<u64>().map(Some).map_err(|_| LoadError::InvalidNumber {
        line,
        column,
        value: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "\
Project Name,SPA,Housing Type,Utilization Rate,PIT Count,Total Beds
Shelter One,4,Emergency Shelter,80.0,80,100
Shelter Two, 4 ,Transitional Housing,90,45,50
Shelter Three,9,Emergency Shelter,70,7,10
";

    fn lookup() -> RegionLookup {
        RegionLookup::los_angeles()
    }

    #[test]
    fn reads_and_resolves_rows() {
        let records = read_bed_records(CSV.as_bytes(), &lookup()).unwrap();
        assert_eq!(records.len(), 3);

        let first = &records[0];
        assert_eq!(first.region.as_ref().unwrap().as_str(), "Metro Los Angeles");
        assert_eq!(first.housing_type.as_deref(), Some("Emergency Shelter"));
        assert_eq!(first.total_beds, Some(100));
        assert_eq!(first.pit_count, Some(80));
        assert_eq!(first.utilization_rate, Some(80.0));

        // Cells are trimmed before resolution.
        assert_eq!(records[1].code, "4");
        assert!(records[1].region.is_some());
    }

    #[test]
    fn unknown_code_is_kept_unresolved() {
        let records = read_bed_records(CSV.as_bytes(), &lookup()).unwrap();
        assert_eq!(records[2].code, "9");
        assert_eq!(records[2].region, None);
    }

    #[test]
    fn missing_column_is_fatal() {
        let csv = "SPA,Housing Type,Utilization Rate,PIT Count\n1,ES,80,8\n";
        let err = read_bed_records(csv.as_bytes(), &lookup()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("Total Beds")));
    }

    #[test]
    fn invalid_number_reports_line_and_column() {
        let csv = "SPA,Housing Type,Utilization Rate,PIT Count,Total Beds\n1,ES,80,8,10\n2,ES,high,8,10\n";
        match read_bed_records(csv.as_bytes(), &lookup()).unwrap_err() {
            LoadError::InvalidNumber { line, column, value } => {
                assert_eq!(line, 3);
                assert_eq!(column, "Utilization Rate");
                assert_eq!(value, "high");
            }
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn counts_accept_integral_floats_only() {
        let csv = "SPA,Housing Type,Utilization Rate,PIT Count,Total Beds\n1,ES,80,8.0,10\n";
        let records = read_bed_records(csv.as_bytes(), &lookup()).unwrap();
        assert_eq!(records[0].pit_count, Some(8));

        let csv = "SPA,Housing Type,Utilization Rate,PIT Count,Total Beds\n1,ES,80,8.5,10\n";
        let err = read_bed_records(csv.as_bytes(), &lookup()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidNumber { column: "PIT Count", .. }));
    }

    #[test]
    fn large_counts_are_exact() {
        let csv = "SPA,Housing Type,Utilization Rate,PIT Count,Total Beds\n\
                   1,ES,80,9007199254740993,12345678901234567\n\
                   1,ES,80,18446744073709551615.0,10000000000000000000\n";
        let records = read_bed_records(csv.as_bytes(), &lookup()).unwrap();
        assert_eq!(records[0].pit_count, Some(9_007_199_254_740_993));
        assert_eq!(records[0].total_beds, Some(12_345_678_901_234_567));
        assert_eq!(records[1].pit_count, Some(u64::MAX));
        assert_eq!(records[1].total_beds, Some(10_000_000_000_000_000_000));
    }

    #[test]
    fn counts_out_of_range_or_negative_are_invalid() {
        for cell in ["18446744073709551616", "-1", ".0", "1e3"] {
            let csv = format!("SPA,Housing Type,Utilization Rate,PIT Count,Total Beds\n1,ES,80,{cell},10\n");
            let err = read_bed_records(csv.as_bytes(), &lookup()).unwrap_err();
            assert!(
                matches!(&err, LoadError::InvalidNumber { column: "PIT Count", value, .. } if value == cell),
                "{cell}: {err:?}"
            );
        }
    }

    #[test]
    fn empty_cells_are_missing_and_rate_is_derived() {
        let csv = "SPA,Housing Type,Utilization Rate,PIT Count,Total Beds\n1,,,30,40\n";
        let records = read_bed_records(csv.as_bytes(), &lookup()).unwrap();
        assert_eq!(records[0].housing_type, None);
        assert_eq!(records[0].utilization_rate, Some(75.0));
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let records = load_bed_records(file.path(), &lookup()).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_bed_records(Path::new("/nonexistent/beds.csv"), &lookup()).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    fn square(code: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "type": "Feature",
            "properties": { "SPA": code },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[-118.0, 34.0], [-118.1, 34.0], [-118.1, 34.1], [-118.0, 34.0]]]
            }
        })
    }

    #[test]
    fn parses_boundaries_with_string_and_numeric_codes() {
        let text = serde_json::json!({
            "type": "FeatureCollection",
            "features": [square(serde_json::json!(1)), square(serde_json::json!("5")), square(serde_json::json!(9))]
        })
        .to_string();
        let boundaries = parse_boundaries(&text, &lookup()).unwrap();
        assert_eq!(boundaries.len(), 3);
        assert_eq!(boundaries[0].code, "1");
        assert_eq!(boundaries[0].region.as_ref().unwrap().as_str(), "Antelope Valley");
        assert_eq!(boundaries[1].region.as_ref().unwrap().as_str(), "West Los Angeles");
        assert_eq!(boundaries[2].region, None);
    }

    #[test]
    fn boundary_root_must_be_feature_collection() {
        let text = square(serde_json::json!(1)).to_string();
        let err = parse_boundaries(&text, &lookup()).unwrap_err();
        assert!(matches!(err, LoadError::NotFeatureCollection));
    }

    #[test]
    fn boundary_without_spa_is_fatal() {
        let text = serde_json::json!({
            "type": "FeatureCollection",
            "features": [square(serde_json::json!(2)), {
                "type": "Feature",
                "properties": { "NAME": "x" },
                "geometry": { "type": "Point", "coordinates": [0.0, 0.0] }
            }]
        })
        .to_string();
        let err = parse_boundaries(&text, &lookup()).unwrap_err();
        assert!(matches!(err, LoadError::MissingProperty { feature: 1, property: "SPA" }));
    }

    #[test]
    fn boundary_without_geometry_is_fatal() {
        let text = serde_json::json!({
            "type": "FeatureCollection",
            "features": [{ "type": "Feature", "properties": { "SPA": "3" }, "geometry": null }]
        })
        .to_string();
        let err = parse_boundaries(&text, &lookup()).unwrap_err();
        assert!(matches!(err, LoadError::MissingGeometry { feature: 0 }));
    }

    #[test]
    fn malformed_geojson_is_fatal() {
        let err = parse_boundaries("{not json", &lookup()).unwrap_err();
        assert!(matches!(err, LoadError::GeoJson(_)));
    }
}
