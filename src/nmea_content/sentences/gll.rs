#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Field,
    nmea0183::{Frame, SentenceType},
    nmea_content::{Coordinate, Parsable, PositioningMode, Status, UtcTime, parse::position},
};

/// GLL - Geographic Position - Latitude/Longitude
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gll_geographic_position_latitudelongitude>
///
/// ```text
///         1       2 3        4 5         6
///         |       | |        | |         |
///  $--GLL,ddmm.mm,a,dddmm.mm,a,hhmmss.ss,a*hh<CR><LF>
/// ```
///
/// NMEA 2.3:
/// ```text
///         1       2 3        4 5         6 7
///         |       | |        | |         | |
///  $--GLL,ddmm.mm,a,dddmm.mm,a,hhmmss.ss,a,m*hh<CR><LF>
/// ```
///
/// The time field is decoded but not range checked.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GllRecord {
    /// Latitude, negative south of the equator
    pub latitude: Field<Coordinate>,
    /// `true` for `N`, `false` for `S`
    pub is_north: Field<bool>,
    /// Longitude, negative west of Greenwich
    pub longitude: Field<Coordinate>,
    /// `true` for `E`, `false` for `W`
    pub is_east: Field<bool>,
    /// Fix time in UTC
    pub time: Field<UtcTime>,
    /// Data valid indicator
    pub status: Field<Status>,
    /// FAA Mode Indicator
    pub mode: Field<PositioningMode>,
}

impl Default for GllRecord {
    fn default() -> Self {
        GllRecord {
            latitude: Field::absent(Coordinate::SENTINEL),
            is_north: Field::absent(false),
            longitude: Field::absent(Coordinate::SENTINEL),
            is_east: Field::absent(false),
            time: Field::absent(UtcTime::SENTINEL),
            status: Field::absent(Status::Unknown),
            mode: Field::absent(PositioningMode::Unknown),
        }
    }
}

impl GllRecord {
    /// Returns `(latitude, longitude)` in signed decimal degrees if both are
    /// present.
    pub fn decimal_position(&self) -> Option<(f64, f64)> {
        Some((self.latitude.get()?.decimal, self.longitude.get()?.decimal))
    }
}

impl Parsable for GllRecord {
    const SENTENCE_TYPE: SentenceType = SentenceType::Gll;

    fn from_frame(frame: &Frame<'_>) -> Self {
        let mut gll = GllRecord::default();

        position(
            &mut gll.latitude,
            &mut gll.is_north,
            frame.field(1),
            frame.field(2),
            ('N', 'S'),
        );
        position(
            &mut gll.longitude,
            &mut gll.is_east,
            frame.field(3),
            frame.field(4),
            ('E', 'W'),
        );
        gll.time.decode(frame.field(5));
        gll.status.decode(frame.field(6));
        gll.mode.decode(frame.field(7));

        gll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fields_present() {
        let gll = GllRecord::parse("$GPGLL,4916.45,N,12311.12,W,225444,A,A*5C").unwrap();

        let (lat, lon) = gll.decimal_position().unwrap();
        assert!((lat - 49.274166667).abs() < 1e-8);
        assert!((lon + 123.185333333).abs() < 1e-8);
        assert_eq!(gll.is_north.get(), Some(true));
        assert_eq!(gll.is_east.get(), Some(false));
        assert_eq!(gll.time.get().map(|t| t.hour), Some(22));
        assert_eq!(gll.status.get(), Some(Status::Valid));
        assert_eq!(gll.mode.get(), Some(PositioningMode::Autonomous));
    }

    #[test]
    fn test_time_not_range_checked() {
        let gll = GllRecord::parse("$GPGLL,4916.45,N,12311.12,W,256199,V*00").unwrap();

        let time = gll.time.get().unwrap();
        assert_eq!((time.hour, time.minute, time.second), (25, 61, 99.0));
        assert_eq!(gll.status.get(), Some(Status::Invalid));
        assert!(!gll.mode.is_present());
    }

    #[test]
    fn test_unrecognized_indicators() {
        let cases = [
            "$GPGLL,4916.45,N,12311.12,W,225444,X,X*00",
            "$GPGLL,4916.45,N,12311.12,W,225444,,*00",
            "$GPGLL,4916.45,N,12311.12,W,225444,AV,a*00",
        ];

        for input in cases {
            let gll = GllRecord::parse(input).unwrap();
            assert!(!gll.status.is_present(), "Failed: {input:?}");
            assert!(!gll.mode.is_present(), "Failed: {input:?}");
            assert!(gll.latitude.is_present(), "Failed: {input:?}");
        }
    }

    #[test]
    fn test_missing_position() {
        let gll = GllRecord::parse("$GPGLL,,,,,,V,N*64").unwrap();

        assert_eq!(gll.decimal_position(), None);
        assert!(gll.latitude.raw().decimal.is_nan());
        assert!(!gll.is_north.is_present());
        assert_eq!(gll.mode.get(), Some(PositioningMode::DataNotValid));
    }
}
