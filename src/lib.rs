// src/lib.rs
//! NMEA Annotations Library
//!
//! Reads NMEA-0183 GPS logs, merges the GGA and RMC sentences reported for
//! the same second and writes them as an annotation container file.

pub mod aggregate;
pub mod annotations;
pub mod config;
pub mod convert;
pub mod error;
pub mod gps;

// Re-export main types for convenience
pub use aggregate::FixAggregator;
pub use annotations::AnnotationWriter;
pub use config::{AltitudePolicy, ConverterConfig, RecordLayout};
pub use convert::{convert, convert_with_config, ConversionSummary, Converter};
pub use error::{ConvertError, Result};
pub use gps::data::AggregatedFix;
