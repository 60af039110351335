// src/gps/time.rs
//! Fix keys and annotation timestamps

use super::data::UtcTime;
use std::fmt;

/// Date value a receiver reports before it has a valid date fix
pub const SENTINEL_DATE: &str = "000000";

/// `HH:MM:SSZ` key shared by all sentences within the same whole second.
///
/// Ordering is plain string ordering, which is chronological inside a single
/// UTC day.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixKey(String);

impl FixKey {
    pub fn from_parts(hours: u8, minutes: u8, seconds: u32) -> Self {
        FixKey(format!("{:02}:{:02}:{:02}Z", hours, minutes, seconds))
    }

    pub fn from_time(time: &UtcTime) -> Self {
        Self::from_parts(time.hours, time.minutes, time.whole_seconds())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FixKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Format `YYYY-MM-DD_HH:MM:SSZ` from a sentence time and a `DDMMYY` date.
///
/// Returns `None` for the sentinel date `000000` and for dates that are not
/// six characters long. Other values are passed through without calendar
/// checks; the year is always `20YY`.
pub fn format_datetime(time: &UtcTime, date: &str) -> Option<String> {
    if date == SENTINEL_DATE || date.len() != 6 {
        return None;
    }

    let day = date.get(0..2)?;
    let month = date.get(2..4)?;
    let year = date.get(4..6)?;

    Some(format!("20{}-{}-{}_{}", year, month, day, FixKey::from_time(time)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: &str, m: &str, s: &str) -> UtcTime {
        UtcTime::parse(h, m, s).unwrap()
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime(&time("12", "05", "30.50"), "150324"),
            Some("2024-03-15_12:05:30Z".to_string())
        );
    }

    #[test]
    fn test_sentinel_date_is_invalid() {
        assert_eq!(format_datetime(&time("00", "00", "00.00"), "000000"), None);
    }

    #[test]
    fn test_unchecked_dates_pass_through() {
        assert_eq!(
            format_datetime(&time("23", "59", "59.99"), "001399"),
            Some("2099-13-00_23:59:59Z".to_string())
        );
    }

    #[test]
    fn test_fix_key_truncates_seconds() {
        let key = FixKey::from_time(&time("09", "00", "05.75"));
        assert_eq!(key.as_str(), "09:00:05Z");
        assert_eq!(key, FixKey::from_time(&time("09", "00", "05.01")));
    }

    #[test]
    fn test_fix_key_ordering() {
        let mut keys = vec![
            FixKey::from_parts(9, 0, 0),
            FixKey::from_parts(23, 59, 59),
            FixKey::from_parts(1, 0, 0),
        ];
        keys.sort();
        let ordered: Vec<&str> = keys.iter().map(FixKey::as_str).collect();
        assert_eq!(ordered, vec!["01:00:00Z", "09:00:00Z", "23:59:59Z"]);
    }
}
