// src/gps/nmea.rs
//! NMEA sentence parsing

use super::data::{DegreeMinutes, GgaSentence, Hemisphere, RmcSentence, Sentence, UtcTime};
use crate::error::Result;
use regex::{Captures, Regex};

// Fix quality, satellite count and HDOP are skipped; altitude may be negative and must carry the `M` unit.
const GGA_PATTERN: &str = r"^\$GPGGA,([0-9]{2})([0-9]{2})([0-9]{2}\.[0-9]+),([0-9]{2})([0-9]+\.[0-9]+),([NS]),([0-9]{3})([0-9]+\.[0-9]+),([EW]),.*?,(-?[0-9.]+),M";

// Only active (`A`) fixes match; magnetic variation, mode and checksum are ignored.
const RMC_PATTERN: &str = r"^\$GPRMC,([0-9]{2})([0-9]{2})([0-9]{2}\.[0-9]+),A,([0-9]{2})([0-9]+\.[0-9]+),([NS]),([0-9]{3})([0-9]+\.[0-9]+),([EW]),([0-9.]+),([0-9.]+),([0-9]{6}),";

/// Matches raw log lines against the GGA and RMC grammars.
///
/// Checksums are not verified, so a damaged sentence that still fits the
/// grammar is accepted.
#[derive(Debug, Clone)]
pub struct SentenceDecoder {
    gga: Regex,
    rmc: Regex,
}

impl SentenceDecoder {
    pub fn new() -> Result<Self> {
        Ok(Self {
            gga: Regex::new(GGA_PATTERN)?,
            rmc: Regex::new(RMC_PATTERN)?,
        })
    }

    /// Decode one line, `None` for anything that is not a GGA or active RMC sentence
    pub fn decode(&self, line: &str) -> Option<Sentence> {
        if let Some(caps) = self.gga.captures(line) {
            return parse_gpgga(&caps).map(Sentence::Gga);
        }
        if let Some(caps) = self.rmc.captures(line) {
            return parse_gprmc(&caps).map(Sentence::Rmc);
        }
        None
    }
}

fn field<'a>(caps: &Captures<'a>, index: usize) -> Option<&'a str> {
    caps.get(index).map(|m| m.as_str())
}

/// Time, latitude and longitude occupy groups 1..=9 in both grammars
fn parse_time_and_position(caps: &Captures) -> Option<(UtcTime, DegreeMinutes, DegreeMinutes)> {
    let time = UtcTime::parse(field(caps, 1)?, field(caps, 2)?, field(caps, 3)?)?;

    let latitude = DegreeMinutes {
        degrees: field(caps, 4)?.parse().ok()?,
        minutes: field(caps, 5)?.parse().ok()?,
        hemisphere: Hemisphere::from_letter(field(caps, 6)?)?,
    };

    let longitude = DegreeMinutes {
        degrees: field(caps, 7)?.parse().ok()?,
        minutes: field(caps, 8)?.parse().ok()?,
        hemisphere: Hemisphere::from_letter(field(caps, 9)?)?,
    };

    Some((time, latitude, longitude))
}

/// Parse GPGGA (Global Positioning System Fix Data) sentence
fn parse_gpgga(caps: &Captures) -> Option<GgaSentence> {
    let (time, latitude, longitude) = parse_time_and_position(caps)?;

    Some(GgaSentence {
        time,
        latitude,
        longitude,
        altitude: field(caps, 10)?.to_string(),
    })
}

/// Parse GPRMC (Recommended Minimum Course) sentence
fn parse_gprmc(caps: &Captures) -> Option<RmcSentence> {
    let (time, latitude, longitude) = parse_time_and_position(caps)?;

    Some(RmcSentence {
        time,
        latitude,
        longitude,
        speed_knots: field(caps, 10)?.to_string(),
        course_degrees: field(caps, 11)?.to_string(),
        date: field(caps, 12)?.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GGA: &str = "$GPGGA,120530.00,1030.5000,S,01530.2500,E,1,08,0.9,545.4,M,46.9,M,,*47";
    const RMC: &str = "$GPRMC,120530.00,A,1030.5000,S,01530.2500,E,0.5,90.0,150324,,,A*6A";

    fn decoder() -> SentenceDecoder {
        SentenceDecoder::new().expect("sentence patterns compile")
    }

    #[test]
    fn test_gpgga_parsing() {
        let gga = match decoder().decode(GGA) {
            Some(Sentence::Gga(gga)) => gga,
            other => panic!("expected GGA, got {:?}", other),
        };

        assert_eq!(gga.time.hours, 12);
        assert_eq!(gga.time.minutes, 5);
        assert_eq!(gga.time.seconds, 30.0);
        assert_eq!(gga.latitude.degrees, 10);
        assert_eq!(gga.latitude.minutes, 30.5);
        assert_eq!(gga.latitude.hemisphere, Hemisphere::South);
        assert_eq!(gga.longitude.degrees, 15);
        assert_eq!(gga.longitude.minutes, 30.25);
        assert_eq!(gga.longitude.hemisphere, Hemisphere::East);
        assert_eq!(gga.altitude, "545.4");
    }

    #[test]
    fn test_gprmc_parsing() {
        let rmc = match decoder().decode(RMC) {
            Some(Sentence::Rmc(rmc)) => rmc,
            other => panic!("expected RMC, got {:?}", other),
        };

        assert_eq!(rmc.time.whole_seconds(), 30);
        assert_eq!(rmc.latitude.hemisphere, Hemisphere::South);
        assert_eq!(rmc.speed_knots, "0.5");
        assert_eq!(rmc.course_degrees, "90.0");
        assert_eq!(rmc.date, "150324");
    }

    #[test]
    fn test_altitude_keeps_written_precision() {
        let line = "$GPGGA,000001.00,4807.0380,N,01131.0000,W,1,08,0.9,100.000,M,,M,,*47";
        match decoder().decode(line) {
            Some(Sentence::Gga(gga)) => assert_eq!(gga.altitude, "100.000"),
            other => panic!("expected GGA, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_altitude_below_sea_level() {
        let line = "$GPGGA,120531.00,1030.5000,S,01530.2500,E,1,08,0.9,-12.3,M,46.9,M,,*47";
        match decoder().decode(line) {
            Some(Sentence::Gga(gga)) => assert_eq!(gga.altitude, "-12.3"),
            other => panic!("expected GGA, got {:?}", other),
        }
    }

    #[test]
    fn test_void_rmc_is_ignored() {
        let line = "$GPRMC,120530.00,V,1030.5000,S,01530.2500,E,0.5,90.0,150324,,,N*6A";
        assert!(decoder().decode(line).is_none());
    }

    #[test]
    fn test_rmc_without_course_is_ignored() {
        let line = "$GPRMC,120530.00,A,1030.5000,S,01530.2500,E,0.5,,150324,,,A*6A";
        assert!(decoder().decode(line).is_none());
    }

    #[test]
    fn test_gga_without_meter_unit_is_ignored() {
        let line = "$GPGGA,120530.00,1030.5000,S,01530.2500,E,1,08,0.9,545.4,F";
        assert!(decoder().decode(line).is_none());
    }

    #[test]
    fn test_trailing_carriage_return() {
        let line = format!("{}\r", RMC);
        assert!(matches!(decoder().decode(&line), Some(Sentence::Rmc(_))));
    }

    #[test]
    fn test_bad_checksum_still_accepted() {
        let line = GGA.replace("*47", "*00");
        assert!(matches!(decoder().decode(&line), Some(Sentence::Gga(_))));
    }

    #[test]
    fn test_invalid_sentence() {
        let decoder = decoder();
        assert!(decoder.decode("$INVALID,123,456").is_none());
        assert!(decoder.decode("").is_none());
        assert!(decoder.decode("$GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1*39").is_none());
        assert!(decoder.decode("$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K*48").is_none());
        assert!(decoder.decode("$GNGGA,120530.00,1030.5000,S,01530.2500,E,1,08,0.9,545.4,M").is_none());
        assert!(decoder.decode("noise $GPGGA,120530.00,1030.5000,S,01530.2500,E,1,08,0.9,545.4,M").is_none());
    }
}
