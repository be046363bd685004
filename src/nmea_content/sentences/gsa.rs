#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Field, FieldDecode,
    nmea0183::{Frame, SentenceType, Talker},
    nmea_content::{FixMode, Parsable, SelectionMode},
};

/// Number of PRN fields in a GSA sentence.
pub const GSA_PRN_FIELDS: usize = 12;

/// GSA - GPS DOP and active satellites
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsa_gps_dop_and_active_satellites>
///
/// ```text
///         1 2 3                      15 16  17
///         | | |                       | |   |
///  $--GSA,a,a,x,x,x,x,x,x,x,x,x,x,x,x,x,x.x,x.x,*hh<CR><LF>
/// ```
///
/// Fields 3 to 14 are the PRNs used in the solution. Only non-empty, positive
/// PRNs are kept, in order, so [`GsaRecord::satellite_count`] may be anything
/// from `0` to `12`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GsaRecord {
    /// Talker ID of the sentence
    pub talker: Talker,
    /// Second character of the talker ID, identifying the constellation
    pub system_id: Field<char>,
    /// Selection Mode
    pub selection_mode: Field<SelectionMode>,
    /// Fix Mode
    pub fix_mode: Field<FixMode>,
    /// PRNs of the satellites used in the solution
    pub prns: heapless::Vec<u16, GSA_PRN_FIELDS>,
    /// Position Dilution of Precision, `0` to `99.9`
    pub pdop: Field<f64>,
    /// Horizontal Dilution of Precision, `0` to `99.9`
    pub hdop: Field<f64>,
    /// Vertical Dilution of Precision, `0` to `99.9`
    pub vdop: Field<f64>,
}

impl Default for GsaRecord {
    fn default() -> Self {
        GsaRecord {
            talker: Talker::default(),
            system_id: Field::absent('\0'),
            selection_mode: Field::absent(SelectionMode::Unknown),
            fix_mode: Field::absent(FixMode::Unknown),
            prns: heapless::Vec::new(),
            pdop: Field::absent(-1.0),
            hdop: Field::absent(-1.0),
            vdop: Field::absent(-1.0),
        }
    }
}

impl GsaRecord {
    /// Number of satellites used in the solution.
    pub fn satellite_count(&self) -> usize {
        self.prns.len()
    }
}

impl Parsable for GsaRecord {
    const SENTENCE_TYPE: SentenceType = SentenceType::Gsa;

    fn from_frame(frame: &Frame<'_>) -> Self {
        let mut gsa = GsaRecord {
            talker: frame.talker(),
            ..GsaRecord::default()
        };

        gsa.system_id.set(frame.system_id());
        gsa.selection_mode.decode(frame.field(1));
        gsa.fix_mode.decode(frame.field(2));

        for prn in (3..3 + GSA_PRN_FIELDS)
            .filter_map(|n| u16::decode(frame.field(n)))
            .filter(|&prn| prn > 0)
        {
            // At most GSA_PRN_FIELDS candidates, so the push cannot fail.
            let _ = gsa.prns.push(prn);
        }

        gsa.pdop.decode_in(frame.field(15), 0.0..=99.9);
        gsa.hdop.decode_in(frame.field(16), 0.0..=99.9);
        gsa.vdop.decode_in(frame.field(17), 0.0..=99.9);

        gsa
    }
}
