//! # Load Errors
//!
//! Every failure here is fatal at startup. Row numbers are 1-based file
//! lines, counting the header as line 1.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reading or decoding an input file.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV could not be decoded.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A required CSV column is absent from the header.
    #[error("missing required column {0:?}")]
    MissingColumn(&'static str),

    /// A numeric cell did not parse.
    #[error("line {line}: column {column:?} has invalid value {value:?}")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },

    /// The boundary file is not valid GeoJSON.
    #[error("geojson error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The boundary file root is a bare geometry or a single feature.
    #[error("boundary file must be a FeatureCollection")]
    NotFeatureCollection,

    /// A boundary feature lacks a property.
    #[error("feature {feature}: missing property {property:?}")]
    MissingProperty {
        feature: usize,
        property: &'static str,
    },

    /// A boundary feature has no geometry.
    #[error("feature {feature}: missing geometry")]
    MissingGeometry { feature: usize },
}
