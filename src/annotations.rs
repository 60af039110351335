// src/annotations.rs
//! Annotation container file output

use crate::config::{ConverterConfig, RecordLayout};
use crate::gps::data::AggregatedFix;
use std::io::{self, Write};

pub const ANNOTATION_HEADER: &str =
    "Annotation Container File, Version, 1.0, ROVER (64-Bit) Version: 4.24.3.500.2";

/// Placeholder written when no GGA altitude was seen for a second
pub const DEFAULT_ALTITUDE: &str = "10.00000000186265";
pub const DEFAULT_COURSE: &str = "0.0";
pub const DEFAULT_SPEED: &str = "0.0";

const SITE_FLAGS: &str = "AGL,0xffffffff";

/// Writes aggregated fixes in the annotation container format
pub struct AnnotationWriter<'a> {
    config: &'a ConverterConfig,
}

impl<'a> AnnotationWriter<'a> {
    pub fn new(config: &'a ConverterConfig) -> Self {
        Self { config }
    }

    /// Write the header and every eligible fix, returning the number of
    /// fixes written. Fixes without a date are skipped.
    pub fn write_to<'f, W, I>(&self, out: &mut W, fixes: I) -> io::Result<usize>
    where
        W: Write,
        I: IntoIterator<Item = &'f AggregatedFix>,
    {
        writeln!(out, "{}", ANNOTATION_HEADER)?;

        let mut written = 0;
        for fix in fixes {
            for line in self.format_record(fix) {
                writeln!(out, "{}", line)?;
            }
            if fix.is_eligible() {
                written += 1;
            }
        }
        Ok(written)
    }

    /// Lines for one fix in the configured layout; empty for undated fixes
    pub fn format_record(&self, fix: &AggregatedFix) -> Vec<String> {
        let Some(datetime) = fix.datetime.as_deref() else {
            return Vec::new();
        };

        let lat = format_coordinate(fix.latitude);
        let lon = format_coordinate(fix.longitude);
        let altitude = fix.altitude.as_deref().unwrap_or(self.config.default_altitude.as_str());
        let course = fix.course.as_deref().unwrap_or(self.config.default_course.as_str());
        let speed = fix.speed.as_deref().unwrap_or(self.config.default_speed.as_str());
        let metadata = format!("Course (°);{};Speed (knots);{}", course, speed);

        match self.config.layout {
            RecordLayout::Merged => vec![format!(
                "SITE,{},{},{},{},{},,,,,{},-1",
                datetime, lat, lon, altitude, SITE_FLAGS, metadata
            )],
            RecordLayout::Split => vec![
                format!(
                    "SITE,{},{},{},{},{},,,,,,-1",
                    datetime, lat, lon, altitude, SITE_FLAGS
                ),
                format!(
                    "SITE,{} (2),{},{},{},{},,,,,{},-1",
                    datetime, lat, lon, altitude, SITE_FLAGS, metadata
                ),
            ],
        }
    }

    /// Render the whole annotation file into a string
    pub fn render<'f, I>(&self, fixes: I) -> io::Result<String>
    where
        I: IntoIterator<Item = &'f AggregatedFix>,
    {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer, fixes)?;
        String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Shortest round-trip decimal form; integral values keep a trailing `.0`
pub fn format_coordinate(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') || !value.is_finite() {
        text
    } else {
        format!("{}.0", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gps::time::FixKey;

    fn dated_fix() -> AggregatedFix {
        let mut fix = AggregatedFix::new(FixKey::from_parts(12, 5, 30), -10.5, 15.25);
        fix.altitude = Some("545.4".to_string());
        fix.course = Some("90.0".to_string());
        fix.speed = Some("0.5".to_string());
        fix.datetime = Some("2024-03-15_12:05:30Z".to_string());
        fix
    }

    #[test]
    fn test_merged_record() {
        let config = ConverterConfig::default();
        let lines = AnnotationWriter::new(&config).format_record(&dated_fix());
        assert_eq!(
            lines,
            vec!["SITE,2024-03-15_12:05:30Z,-10.5,15.25,545.4,AGL,0xffffffff,,,,,Course (°);90.0;Speed (knots);0.5,-1"]
        );
    }

    #[test]
    fn test_split_record() {
        let config = ConverterConfig::default().with_layout(RecordLayout::Split);
        let lines = AnnotationWriter::new(&config).format_record(&dated_fix());
        assert_eq!(
            lines,
            vec![
                "SITE,2024-03-15_12:05:30Z,-10.5,15.25,545.4,AGL,0xffffffff,,,,,,-1",
                "SITE,2024-03-15_12:05:30Z (2),-10.5,15.25,545.4,AGL,0xffffffff,,,,,Course (°);90.0;Speed (knots);0.5,-1",
            ]
        );
    }

    #[test]
    fn test_placeholder_defaults() {
        let config = ConverterConfig::default();
        let mut fix = dated_fix();
        fix.altitude = None;
        fix.course = None;
        fix.speed = None;

        let lines = AnnotationWriter::new(&config).format_record(&fix);
        assert!(lines[0].contains(",10.00000000186265,AGL,"));
        assert!(lines[0].ends_with("Course (°);0.0;Speed (knots);0.0,-1"));
    }

    #[test]
    fn test_undated_fix_is_skipped() {
        let config = ConverterConfig::default();
        let mut undated = dated_fix();
        undated.datetime = None;

        let text = AnnotationWriter::new(&config).render([&undated, &dated_fix()]).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], ANNOTATION_HEADER);
    }

    #[test]
    fn test_write_to_counts_records() {
        let config = ConverterConfig::default().with_layout(RecordLayout::Split);
        let fix = dated_fix();
        let mut out = Vec::new();
        let written = AnnotationWriter::new(&config).write_to(&mut out, [&fix]).unwrap();
        assert_eq!(written, 1);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 3);
    }

    #[test]
    fn test_degree_sign_is_utf8() {
        let config = ConverterConfig::default();
        let text = AnnotationWriter::new(&config).render([&dated_fix()]).unwrap();
        assert!(text.contains("Course (\u{00b0})"));
        assert!(!text.contains('\u{00c2}'));
    }

    #[test]
    fn test_header_ignores_config_file_override() {
        let config: ConverterConfig =
            serde_json::from_str(r#"{"header": "Something else", "layout": "merged"}"#).unwrap();
        let text = AnnotationWriter::new(&config).render([&dated_fix()]).unwrap();
        assert_eq!(text.lines().next(), Some(ANNOTATION_HEADER));
        assert!(!text.contains("Something else"));
    }

    #[test]
    fn test_render_matches_write_to() {
        let config = ConverterConfig::default();
        let fix = dated_fix();
        let mut out = Vec::new();
        AnnotationWriter::new(&config).write_to(&mut out, [&fix]).unwrap();
        let rendered = AnnotationWriter::new(&config).render([&fix]).unwrap();
        assert_eq!(rendered.as_bytes(), out.as_slice());
    }

    #[test]
    fn test_format_coordinate() {
        assert_eq!(format_coordinate(15.0), "15.0");
        assert_eq!(format_coordinate(-10.508333333333333), "-10.508333333333333");
        assert_eq!(format_coordinate(0.00001), "0.00001");
    }
}
