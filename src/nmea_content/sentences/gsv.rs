#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Field, FieldDecode,
    nmea0183::{Frame, SentenceType, Talker},
    nmea_content::Parsable,
};

/// Number of satellite blocks in one GSV sentence.
pub const GSV_SATELLITE_BLOCKS: usize = 4;

/// Satellite information used in [`GsvRecord`] sentences
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Satellite {
    /// Satellite PRN number, always positive
    pub prn: u16,
    /// Elevation in degrees, `0` to `90`
    pub elevation: Field<i32>,
    /// Azimuth in degrees true, `0` to `359`
    pub azimuth: Field<i32>,
    /// Signal to noise ratio in dB-Hz, `0` to `99`
    pub snr: Field<i32>,
}

impl Satellite {
    /// Decodes one satellite block. Returns `None` if the PRN is empty or not
    /// positive.
    fn decode(prn: &str, elevation: &str, azimuth: &str, snr: &str) -> Option<Self> {
        let prn = u16::decode(prn).filter(|&prn| prn > 0)?;

        let mut satellite = Satellite {
            prn,
            elevation: Field::absent(-1),
            azimuth: Field::absent(-1),
            snr: Field::absent(-1),
        };
        satellite.elevation.decode_in(elevation, 0..=90);
        satellite.azimuth.decode_in(azimuth, 0..=359);
        satellite.snr.decode_in(snr, 0..=99);

        Some(satellite)
    }
}

/// GSV - Satellites in View
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsv_satellites_in_view>
///
/// ```text
///         1 2 3 4 5 6 7     n
///         | | | | | | |     |
///  $--GSV,x,x,x,x,x,x,x,...,x*hh<CR><LF>
/// ```
///
/// Fields 4 to 19 hold up to four satellite blocks of PRN, elevation, azimuth
/// and SNR. A block is kept only if its PRN is present and positive; its other
/// three values are each optional. A leftover group of fewer than four fields,
/// such as the NMEA 4.10 signal ID, is not a satellite block.
///
/// One sentence is one fragment of a constellation's satellite list; see
/// [`ConstellationAggregator`](crate::ConstellationAggregator) for reassembly.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GsvRecord {
    /// Talker ID of the sentence
    pub talker: Talker,
    /// Second character of the talker ID, identifying the constellation
    pub system_id: Field<char>,
    /// Total number of GSV sentences to be transmitted in this group, `1` to `9`
    pub total_messages: Field<i32>,
    /// Sentence number of this GSV message within current group, `1` to `9`
    pub message_number: Field<i32>,
    /// Total number of satellites in view, `0` to `99`
    pub satellites_in_view: Field<i32>,
    /// Satellite information
    pub satellites: heapless::Vec<Satellite, GSV_SATELLITE_BLOCKS>,
}

impl Default for GsvRecord {
    fn default() -> Self {
        GsvRecord {
            talker: Talker::default(),
            system_id: Field::absent('\0'),
            total_messages: Field::absent(-1),
            message_number: Field::absent(-1),
            satellites_in_view: Field::absent(-1),
            satellites: heapless::Vec::new(),
        }
    }
}

impl GsvRecord {
    /// Number of satellite blocks present in this fragment.
    pub fn satellite_count(&self) -> usize {
        self.satellites.len()
    }
}

impl Parsable for GsvRecord {
    const SENTENCE_TYPE: SentenceType = SentenceType::Gsv;

    fn from_frame(frame: &Frame<'_>) -> Self {
        let mut gsv = GsvRecord {
            talker: frame.talker(),
            ..GsvRecord::default()
        };

        gsv.system_id.set(frame.system_id());
        gsv.total_messages.decode_in(frame.field(1), 1..=9);
        gsv.message_number.decode_in(frame.field(2), 1..=9);
        gsv.satellites_in_view.decode_in(frame.field(3), 0..=99);

        for block in 0..GSV_SATELLITE_BLOCKS {
            let n = 4 + block * 4;
            // NMEA 4.10 appends a signal ID after the last block.
            if n + 3 > frame.len() {
                break;
            }
            let satellite = Satellite::decode(
                frame.field(n),
                frame.field(n + 1),
                frame.field(n + 2),
                frame.field(n + 3),
            );

            if let Some(satellite) = satellite {
                // One block per slot, so the push cannot fail.
                let _ = gsv.satellites.push(satellite);
            }
        }

        gsv
    }
}
