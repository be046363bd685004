#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Field,
    nmea0183::{Frame, SentenceType},
    nmea_content::{
        Coordinate, Parsable, Quality, UtcTime,
        parse::{checked_time, expect_unit, position},
    },
};

/// GGA - Global Positioning System Fix Data
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gga_global_positioning_system_fix_data>
///
/// ```text
///                                                      11
///         1         2       3 4        5 6 7  8   9  10 |  12 13  14
///         |         |       | |        | | |  |   |   | |   | |   |
///  $--GGA,hhmmss.ss,ddmm.mm,a,dddmm.mm,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GgaRecord {
    /// Fix time in UTC
    pub time: Field<UtcTime>,
    /// Latitude, negative south of the equator
    pub latitude: Field<Coordinate>,
    /// `true` for `N`, `false` for `S`
    pub is_north: Field<bool>,
    /// Longitude, negative west of Greenwich
    pub longitude: Field<Coordinate>,
    /// `true` for `E`, `false` for `W`
    pub is_east: Field<bool>,
    /// GPS Quality Indicator
    pub fix_quality: Field<Quality>,
    /// Number of satellites in use, `0` to `99`
    pub satellites_used: Field<i32>,
    /// Horizontal Dilution of Precision, `0` to `99.9`
    pub hdop: Field<f64>,
    /// Antenna altitude above/below mean sea level (geoid) in meters
    pub altitude: Field<f64>,
    /// Geoidal separation in meters
    pub geoid_separation: Field<f64>,
    /// Age of differential GPS data in seconds
    pub differential_age: Field<f64>,
    /// Differential reference station ID, `0` to `4095`
    pub differential_station: Field<i32>,
}

impl Default for GgaRecord {
    fn default() -> Self {
        GgaRecord {
            time: Field::absent(UtcTime::SENTINEL),
            latitude: Field::absent(Coordinate::SENTINEL),
            is_north: Field::absent(false),
            longitude: Field::absent(Coordinate::SENTINEL),
            is_east: Field::absent(false),
            fix_quality: Field::absent(Quality::Unknown),
            satellites_used: Field::absent(-1),
            hdop: Field::absent(-1.0),
            altitude: Field::absent(f64::NAN),
            geoid_separation: Field::absent(f64::NAN),
            differential_age: Field::absent(-1.0),
            differential_station: Field::absent(-1),
        }
    }
}

impl Parsable for GgaRecord {
    const SENTENCE_TYPE: SentenceType = SentenceType::Gga;

    fn from_frame(frame: &Frame<'_>) -> Self {
        let mut gga = GgaRecord::default();

        gga.time.assign(checked_time(frame.field(1)));
        position(
            &mut gga.latitude,
            &mut gga.is_north,
            frame.field(2),
            frame.field(3),
            ('N', 'S'),
        );
        position(
            &mut gga.longitude,
            &mut gga.is_east,
            frame.field(4),
            frame.field(5),
            ('E', 'W'),
        );
        gga.fix_quality.decode(frame.field(6));
        gga.satellites_used.decode_in(frame.field(7), 0..=99);
        gga.hdop.decode_in(frame.field(8), 0.0..=99.9);
        gga.altitude.decode_in(frame.field(9), -9999.9..=9999.9);
        expect_unit(Self::SENTENCE_TYPE, 10, frame.field(10), 'M');
        gga.geoid_separation
            .decode_in(frame.field(11), -9999.9..=9999.9);
        expect_unit(Self::SENTENCE_TYPE, 12, frame.field(12), 'M');
        gga.differential_age.decode_in(frame.field(13), 0.0..);
        gga.differential_station.decode_in(frame.field(14), 0..=4095);

        gga
    }
}
