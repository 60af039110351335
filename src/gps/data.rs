// src/gps/data.rs
//! GPS data structures and utilities

use super::time::FixKey;

/// Hemisphere letter attached to a degree-minute coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "N" => Some(Hemisphere::North),
            "S" => Some(Hemisphere::South),
            "E" => Some(Hemisphere::East),
            "W" => Some(Hemisphere::West),
            _ => None,
        }
    }

    /// South and west coordinates are negative in decimal degrees
    pub fn is_negative(&self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }
}

/// Convert degrees, minutes and hemisphere into signed decimal degrees
pub fn normalize_coordinate(degrees: u16, minutes: f64, hemisphere: Hemisphere) -> f64 {
    let value = degrees as f64 + minutes / 60.0;
    if hemisphere.is_negative() {
        -value
    } else {
        value
    }
}

/// A coordinate as it appears in a sentence (`ddmm.mmmm` / `dddmm.mmmm`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegreeMinutes {
    pub degrees: u16,
    pub minutes: f64,
    pub hemisphere: Hemisphere,
}

impl DegreeMinutes {
    pub fn to_decimal(&self) -> f64 {
        normalize_coordinate(self.degrees, self.minutes, self.hemisphere)
    }
}

/// UTC time of day carried by GGA and RMC sentences
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtcTime {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: f64,
}

impl UtcTime {
    /// Build from the raw `hh`, `mm` and `ss.ss` sentence fields
    pub fn parse(hours: &str, minutes: &str, seconds: &str) -> Option<Self> {
        Some(Self {
            hours: hours.parse().ok()?,
            minutes: minutes.parse().ok()?,
            seconds: seconds.parse().ok()?,
        })
    }

    /// Seconds truncated toward zero
    pub fn whole_seconds(&self) -> u32 {
        self.seconds.trunc() as u32
    }
}

/// Decoded `$GPGGA` fix report
#[derive(Debug, Clone, PartialEq)]
pub struct GgaSentence {
    pub time: UtcTime,
    pub latitude: DegreeMinutes,
    pub longitude: DegreeMinutes,
    /// Altitude in meters, kept as written in the log
    pub altitude: String,
}

/// Decoded `$GPRMC` report with an active (`A`) status
#[derive(Debug, Clone, PartialEq)]
pub struct RmcSentence {
    pub time: UtcTime,
    pub latitude: DegreeMinutes,
    pub longitude: DegreeMinutes,
    pub speed_knots: String,
    pub course_degrees: String,
    /// `DDMMYY`, `000000` when the receiver has no date yet
    pub date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Sentence {
    Gga(GgaSentence),
    Rmc(RmcSentence),
}

impl Sentence {
    pub fn time(&self) -> &UtcTime {
        match self {
            Sentence::Gga(gga) => &gga.time,
            Sentence::Rmc(rmc) => &rmc.time,
        }
    }
}

/// Everything known about one second of the log
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedFix {
    pub key: FixKey,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<String>,
    pub course: Option<String>,
    pub speed: Option<String>,
    pub datetime: Option<String>,
}

impl AggregatedFix {
    pub fn new(key: FixKey, latitude: f64, longitude: f64) -> Self {
        Self {
            key,
            latitude,
            longitude,
            altitude: None,
            course: None,
            speed: None,
            datetime: None,
        }
    }

    /// Only entries that received a dated RMC sentence are written out
    pub fn is_eligible(&self) -> bool {
        self.datetime.is_some()
    }
}
