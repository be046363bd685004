#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Field, FieldDecode,
    nmea0183::{Frame, SentenceType},
    nmea_content::{
        CalendarDate, Coordinate, Parsable, PositioningMode, Status, UtcTime,
        parse::{checked_time, hemisphere, position},
    },
};

/// RMC - Recommended Minimum Navigation Information
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rmc_recommended_minimum_navigation_information>
///
/// ```text
///         1         2 3       4 5        6  7   8   9    10 111213
///         |         | |       | |        |  |   |   |    |  | | |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a,m,s*hh<CR><LF>
/// ```
///
/// Field 12 (mode) was added in NMEA 2.3 and field 13 (navigation status) in
/// NMEA 4.1; both are absent on older receivers.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct RmcRecord {
    /// Fix time in UTC
    pub time: Field<UtcTime>,
    /// Status Mode Indicator
    pub status: Field<Status>,
    /// Latitude, negative south of the equator
    pub latitude: Field<Coordinate>,
    /// `true` for `N`, `false` for `S`
    pub is_north: Field<bool>,
    /// Longitude, negative west of Greenwich
    pub longitude: Field<Coordinate>,
    /// `true` for `E`, `false` for `W`
    pub is_east: Field<bool>,
    /// Speed over ground in knots, `0` to `999.9`
    pub speed_knots: Field<f64>,
    /// Course over ground in degrees true, `0` to `360` (exclusive)
    pub course: Field<f64>,
    /// Fix date in UTC
    pub date: Field<CalendarDate>,
    /// Magnetic variation in degrees, negative to the west
    pub magnetic_variation: Field<f64>,
    /// `true` for an easterly variation, `false` for westerly
    pub is_magnetic_east: Field<bool>,
    /// FAA Mode Indicator
    pub mode: Field<PositioningMode>,
    /// Navigation status character (NMEA 4.1)
    pub nav_status: Field<char>,
}

impl Default for RmcRecord {
    fn default() -> Self {
        RmcRecord {
            time: Field::absent(UtcTime::SENTINEL),
            status: Field::absent(Status::Unknown),
            latitude: Field::absent(Coordinate::SENTINEL),
            is_north: Field::absent(false),
            longitude: Field::absent(Coordinate::SENTINEL),
            is_east: Field::absent(false),
            speed_knots: Field::absent(-1.0),
            course: Field::absent(-1.0),
            date: Field::absent(CalendarDate::SENTINEL),
            magnetic_variation: Field::absent(f64::NAN),
            is_magnetic_east: Field::absent(false),
            mode: Field::absent(PositioningMode::Unknown),
            nav_status: Field::absent('\0'),
        }
    }
}

impl Parsable for RmcRecord {
    const SENTENCE_TYPE: SentenceType = SentenceType::Rmc;

    fn from_frame(frame: &Frame<'_>) -> Self {
        let mut rmc = RmcRecord::default();

        rmc.time.assign(checked_time(frame.field(1)));
        rmc.status.decode(frame.field(2));
        position(
            &mut rmc.latitude,
            &mut rmc.is_north,
            frame.field(3),
            frame.field(4),
            ('N', 'S'),
        );
        position(
            &mut rmc.longitude,
            &mut rmc.is_east,
            frame.field(5),
            frame.field(6),
            ('E', 'W'),
        );
        rmc.speed_knots.decode_in(frame.field(7), 0.0..=999.9);
        rmc.course.decode_in(frame.field(8), 0.0..360.0);
        rmc.date.decode(frame.field(9));

        let east = hemisphere(frame.field(11), 'E', 'W');
        rmc.is_magnetic_east.assign(east);
        rmc.magnetic_variation.assign(
            f64::decode(frame.field(10))
                .filter(|v| (0.0..=180.0).contains(v))
                .map(|v| if east == Some(false) { -v } else { v }),
        );

        rmc.mode.assign(
            char::decode(frame.field(12))
                .and_then(|c| PositioningMode::from_char(c.to_ascii_uppercase())),
        );
        rmc.nav_status.decode(frame.field(13));

        rmc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn approx(field: Field<Coordinate>) -> Option<f64> {
        field.get().map(|c| (c.decimal * 1e5).round() / 1e5)
    }

    #[test]
    fn test_worked_example() {
        let rmc = RmcRecord::parse(
            "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A",
        )
        .unwrap();

        let time = rmc.time.get().unwrap();
        assert_eq!((time.hour, time.minute, time.second), (12, 35, 19.0));
        assert_eq!(rmc.status.get().map(Status::code), Some(1));
        assert_eq!(approx(rmc.latitude), Some(48.1173));
        assert_eq!(rmc.is_north.get(), Some(true));
        assert_eq!(approx(rmc.longitude), Some(11.51667));
        assert_eq!(rmc.is_east.get(), Some(true));
        assert_eq!(rmc.speed_knots.get(), Some(22.4));
        assert_eq!(rmc.course.get(), Some(84.4));
        assert_eq!(
            rmc.date.get(),
            Some(CalendarDate {
                year: 1994,
                month: 3,
                day: 23
            })
        );
        assert_eq!(rmc.magnetic_variation.get(), Some(-3.1));
        assert_eq!(rmc.is_magnetic_east.get(), Some(false));
        assert!(!rmc.mode.is_present());
        assert_eq!(rmc.mode.raw().code(), -1);
        assert!(!rmc.nav_status.is_present());
    }

    #[test]
    fn test_all_fields_present() {
        let rmc = RmcRecord::parse(
            "$GNRMC,092725.00,A,4717.11399,S,00833.91590,W,0.004,77.52,091202,1.5,E,d,V*00",
        )
        .unwrap();

        assert!(rmc.time.is_present());
        assert_eq!(rmc.status.get(), Some(Status::Valid));
        assert!(rmc.latitude.get().unwrap().decimal < 0.0);
        assert_eq!(rmc.is_north.get(), Some(false));
        assert!(rmc.longitude.get().unwrap().decimal < 0.0);
        assert_eq!(rmc.is_east.get(), Some(false));
        assert_eq!(rmc.speed_knots.get(), Some(0.004));
        assert_eq!(rmc.course.get(), Some(77.52));
        assert_eq!(rmc.date.get().map(|d| d.year), Some(2002));
        assert_eq!(rmc.magnetic_variation.get(), Some(1.5));
        assert_eq!(rmc.is_magnetic_east.get(), Some(true));
        assert_eq!(rmc.mode.get(), Some(PositioningMode::Differential));
        assert_eq!(rmc.nav_status.get(), Some('V'));
    }

    #[test]
    fn test_out_of_range_fields() {
        let rmc = RmcRecord::parse(
            "$GPRMC,246519,X,0000.000,N,01131.000,E,1022.4,360.0,320394,181.0,W,Q*00",
        )
        .unwrap();

        assert!(!rmc.time.is_present());
        assert!(!rmc.status.is_present());
        assert!(!rmc.latitude.is_present());
        assert_eq!(rmc.is_north.get(), Some(true));
        assert!(rmc.longitude.is_present());
        assert!(!rmc.speed_knots.is_present());
        assert!(!rmc.course.is_present());
        assert!(!rmc.date.is_present());
        assert!(!rmc.magnetic_variation.is_present());
        assert_eq!(rmc.is_magnetic_east.get(), Some(false));
        assert!(!rmc.mode.is_present());
    }

    #[test]
    fn test_empty_sentence() {
        let rmc = RmcRecord::parse("$GPRMC,,V,,,,,,,,,,N*53").unwrap();

        assert_eq!(rmc.status.get(), Some(Status::Invalid));
        assert_eq!(rmc.mode.get(), Some(PositioningMode::DataNotValid));
        assert!(!rmc.time.is_present());
        assert_eq!(rmc.time.raw().fractional_hours(), -1.0);
        assert!(rmc.latitude.raw().decimal.is_nan());
        assert_eq!(rmc.speed_knots.raw(), -1.0);
        assert_eq!(rmc.date.raw(), CalendarDate::SENTINEL);
    }

    #[test]
    fn test_structural_errors() {
        assert_eq!(
            RmcRecord::parse("$GPGGA,123519,A*00").unwrap_err(),
            Error::TypeMismatch {
                expected: SentenceType::Rmc
            }
        );
        assert_eq!(
            RmcRecord::parse("$GPRMC,123519,A,4807.038,N").unwrap_err(),
            Error::MissingChecksumDelimiter
        );
    }
}
