#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Field, FieldDecode,
    nmea0183::{Frame, SentenceType},
    nmea_content::{Parsable, PositioningMode, parse::expect_unit},
};

/// VTG - Track made good and Ground speed
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_vtg_track_made_good_and_ground_speed>
///
/// ```text
///          1  2  3  4  5  6  7  8
///          |  |  |  |  |  |  |  |
///  $--VTG,x.x,T,x.x,M,x.x,N,x.x,K*hh<CR><LF>
/// ```
///
/// NMEA 2.3:
///
/// ```text
///          1  2  3  4  5  6  7  8 9
///          |  |  |  |  |  |  |  | |
///  $--VTG,x.x,T,x.x,M,x.x,N,x.x,K,m*hh<CR><LF>
/// ```
///
/// The unit letters (fields 2, 4, 6 and 8) are checked, but a wrong letter does
/// not invalidate the value before it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct VtgRecord {
    /// Course over ground, degrees true
    pub true_course: Field<f64>,
    /// Course over ground, degrees magnetic
    pub magnetic_course: Field<f64>,
    /// Speed over ground in knots
    pub speed_knots: Field<f64>,
    /// Speed over ground in kilometers per hour
    pub speed_kmh: Field<f64>,
    /// FAA Mode Indicator, one of `A`, `D`, `E` or `N`
    pub mode: Field<PositioningMode>,
}

impl Default for VtgRecord {
    fn default() -> Self {
        VtgRecord {
            true_course: Field::absent(-1.0),
            magnetic_course: Field::absent(-1.0),
            speed_knots: Field::absent(-1.0),
            speed_kmh: Field::absent(-1.0),
            mode: Field::absent(PositioningMode::Unknown),
        }
    }
}

impl Parsable for VtgRecord {
    const SENTENCE_TYPE: SentenceType = SentenceType::Vtg;

    fn from_frame(frame: &Frame<'_>) -> Self {
        let mut vtg = VtgRecord::default();

        vtg.true_course.decode_in(frame.field(1), 0.0..360.0);
        expect_unit(Self::SENTENCE_TYPE, 2, frame.field(2), 'T');
        vtg.magnetic_course.decode_in(frame.field(3), 0.0..360.0);
        expect_unit(Self::SENTENCE_TYPE, 4, frame.field(4), 'M');
        vtg.speed_knots.decode_in(frame.field(5), 0.0..=999.9);
        expect_unit(Self::SENTENCE_TYPE, 6, frame.field(6), 'N');
        vtg.speed_kmh.decode_in(frame.field(7), 0.0..=1851.8);
        expect_unit(Self::SENTENCE_TYPE, 8, frame.field(8), 'K');
        vtg.mode
            .assign(PositioningMode::decode(frame.field(9)).filter(|m| m.is_track_mode()));

        vtg
    }
}
