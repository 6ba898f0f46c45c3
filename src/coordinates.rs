//! Degrees/minutes/seconds to signed decimal degree conversion.
//!
//! No range validation is applied: values outside ±90/±180 pass through.

use std::str::FromStr;

/// Compass hemisphere suffix attached to a DMS angle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Southern and western angles are negative
    pub fn sign(&self) -> f64 {
        match self {
            Hemisphere::North | Hemisphere::East => 1.0,
            Hemisphere::South | Hemisphere::West => -1.0,
        }
    }

    pub fn is_latitude(&self) -> bool {
        matches!(self, Hemisphere::North | Hemisphere::South)
    }
}

impl FromStr for Hemisphere {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(Hemisphere::North),
            "S" => Ok(Hemisphere::South),
            "E" => Ok(Hemisphere::East),
            "W" => Ok(Hemisphere::West),
            _ => Err(()),
        }
    }
}

/// An angle in degrees, minutes and seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
    pub hemisphere: Hemisphere,
}

impl Dms {
    /// Build from captured text; `None` if any component fails to parse
    pub fn parse(degrees: &str, minutes: &str, seconds: &str, hemisphere: &str) -> Option<Self> {
        Some(Self {
            degrees: degrees.parse().ok()?,
            minutes: minutes.parse().ok()?,
            seconds: seconds.parse().ok()?,
            hemisphere: hemisphere.parse().ok()?,
        })
    }

    pub fn to_decimal(&self) -> f64 {
        dms_to_decimal(self.degrees, self.minutes, self.seconds, self.hemisphere)
    }
}

/// `deg + min/60 + sec/3600`, negated for S and W
pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64, hemisphere: Hemisphere) -> f64 {
    hemisphere.sign() * (degrees + minutes / 60.0 + seconds / 3600.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_half_degree_conversion() {
        let lat = dms_to_decimal(45.0, 30.0, 0.0, Hemisphere::North);
        let lon = dms_to_decimal(122.0, 30.0, 0.0, Hemisphere::West);
        assert!((lat - 45.5).abs() < EPSILON);
        assert!((lon + 122.5).abs() < EPSILON);
    }

    #[test]
    fn test_seconds_contribute() {
        let value = dms_to_decimal(0.0, 0.0, 36.0, Hemisphere::East);
        assert!((value - 0.01).abs() < EPSILON);
        let value = dms_to_decimal(10.0, 0.0, 36.0, Hemisphere::South);
        assert!((value + 10.01).abs() < EPSILON);
    }

    #[test]
    fn test_no_range_validation() {
        let value = dms_to_decimal(200.0, 0.0, 0.0, Hemisphere::North);
        assert_eq!(value, 200.0);
    }

    #[test]
    fn test_parse_components() {
        let dms = Dms::parse("40", "00", "12.5", "N").unwrap();
        assert_eq!(dms.hemisphere, Hemisphere::North);
        assert!((dms.to_decimal() - (40.0 + 12.5 / 3600.0)).abs() < EPSILON);

        assert!(Dms::parse("40", "xx", "0", "N").is_none());
        assert!(Dms::parse("40", "0", "0", "Q").is_none());
    }

    #[test]
    fn test_hemisphere_axes() {
        assert!(Hemisphere::North.is_latitude());
        assert!(Hemisphere::South.is_latitude());
        assert!(!Hemisphere::East.is_latitude());
        assert!(!Hemisphere::West.is_latitude());
    }
}
