mod gga;
mod gll;
mod gsa;
mod gsv;
mod rmc;
mod vtg;
mod zda;

pub use gga::GgaRecord;
pub use gll::GllRecord;
pub use gsa::GsaRecord;
pub use gsv::{GsvRecord, Satellite};
pub use rmc::RmcRecord;
pub use vtg::VtgRecord;
pub use zda::ZdaRecord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Error, FieldDecode, Result,
    nmea0183::{ChecksumMode, Frame, SentenceType, type_code},
};

/// A trait for records that can be decoded from one NMEA 0183 sentence.
///
/// Implementors only describe how to fill the record from an already framed
/// sentence ([`Parsable::from_frame`]); framing itself (type check, checksum
/// delimiter, working-buffer bound) is shared by the provided methods.
///
/// Every field is decoded independently: a field that is empty, malformed or
/// out of range is left absent while the remaining fields still decode.
pub trait Parsable: Sized + Default {
    /// The sentence type this record is decoded from.
    const SENTENCE_TYPE: SentenceType;

    /// Builds the record from a framed sentence, starting from the all-absent
    /// state.
    fn from_frame(frame: &Frame<'_>) -> Self;

    /// Parses a complete sentence, e.g. `$GPGLL,4916.45,N,12311.12,W,225444,A*31`.
    ///
    /// The checksum delimiter must be present, but its value is not verified.
    ///
    /// # Errors
    ///
    /// Returns a structural [`Error`] if the sentence is not of type
    /// [`Parsable::SENTENCE_TYPE`], has no `*` delimiter, or is too long. No
    /// record is produced in that case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nmea0183_epoch::{Error, GllRecord, Parsable, SentenceType};
    ///
    /// let gll = GllRecord::parse("$GPGLL,4916.45,N,12311.12,W,225444,A*31").unwrap();
    /// assert_eq!(gll.is_north.get(), Some(true));
    ///
    /// let result = GllRecord::parse("$GPRMC,225444,A*00");
    /// assert_eq!(result.unwrap_err(), Error::TypeMismatch { expected: SentenceType::Gll });
    /// ```
    fn parse(sentence: &str) -> Result<Self> {
        Self::parse_with(sentence, ChecksumMode::Ignore)
    }

    /// Parses a complete sentence with the given checksum handling.
    fn parse_with(sentence: &str, mode: ChecksumMode) -> Result<Self> {
        let frame = Frame::split(sentence, Self::SENTENCE_TYPE, mode)?;
        Ok(Self::from_frame(&frame))
    }
}

/// A unified enum representing all supported NMEA 0183 sentence types.
///
/// Each variant wraps the corresponding record. [`NmeaSentence::parse_with`]
/// reads the type code of a raw sentence and hands it to the matching
/// [`Parsable`] implementation.
///
/// | Variant                  | Sentence Type                                           |
/// |--------------------------|---------------------------------------------------------|
/// | Gga([`GgaRecord`])       | Global Positioning System Fix Data                      |
/// | Gll([`GllRecord`])       | Geographic Position - Latitude/Longitude                |
/// | Gsa([`GsaRecord`])       | GNSS DOP and active satellites                          |
/// | Gsv([`GsvRecord`])       | Satellites in View                                      |
/// | Rmc([`RmcRecord`])       | Recommended Minimum Navigation Information              |
/// | Vtg([`VtgRecord`])       | Track made good and Ground speed                        |
/// | Zda([`ZdaRecord`])       | Time & Date - UTC, day, month, year and local time zone |
///
/// ```rust
/// use nmea0183_epoch::{ChecksumMode, Error, NmeaSentence};
///
/// let sentence =
///     NmeaSentence::parse_with("$GPZDA,201530.00,04,07,2002,00,00*60", ChecksumMode::Verify);
/// assert!(matches!(sentence, Ok(NmeaSentence::Zda(_))));
///
/// let result = NmeaSentence::parse_with("$GPTXT,01,01,02,ANTSTATUS=OK*3B", ChecksumMode::Ignore);
/// assert_eq!(result.unwrap_err(), Error::UnrecognizedSentence);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum NmeaSentence {
    /// Global Positioning System Fix Data
    Gga(GgaRecord),
    /// Geographic Position - Latitude/Longitude
    Gll(GllRecord),
    /// GNSS DOP and active satellites
    Gsa(GsaRecord),
    /// Satellites in View
    Gsv(GsvRecord),
    /// Recommended Minimum Navigation Information
    Rmc(RmcRecord),
    /// Track made good and Ground speed
    Vtg(VtgRecord),
    /// Time & Date - UTC, day, month, year and local time zone
    Zda(ZdaRecord),
}

impl NmeaSentence {
    /// Parses any supported sentence.
    ///
    /// # Errors
    ///
    /// [`Error::UnrecognizedSentence`] for type codes outside the supported
    /// set, otherwise the structural errors of [`Parsable::parse_with`].
    pub fn parse_with(sentence: &str, mode: ChecksumMode) -> Result<Self> {
        let sentence_type = type_code(sentence)
            .and_then(SentenceType::from_code)
            .ok_or(Error::UnrecognizedSentence)?;

        match sentence_type {
            SentenceType::Gga => GgaRecord::parse_with(sentence, mode).map(Self::Gga),
            SentenceType::Gll => GllRecord::parse_with(sentence, mode).map(Self::Gll),
            SentenceType::Gsa => GsaRecord::parse_with(sentence, mode).map(Self::Gsa),
            SentenceType::Gsv => GsvRecord::parse_with(sentence, mode).map(Self::Gsv),
            SentenceType::Rmc => RmcRecord::parse_with(sentence, mode).map(Self::Rmc),
            SentenceType::Vtg => VtgRecord::parse_with(sentence, mode).map(Self::Vtg),
            SentenceType::Zda => ZdaRecord::parse_with(sentence, mode).map(Self::Zda),
        }
    }

    /// Returns the type of the wrapped record.
    pub fn sentence_type(&self) -> SentenceType {
        match self {
            NmeaSentence::Gga(_) => SentenceType::Gga,
            NmeaSentence::Gll(_) => SentenceType::Gll,
            NmeaSentence::Gsa(_) => SentenceType::Gsa,
            NmeaSentence::Gsv(_) => SentenceType::Gsv,
            NmeaSentence::Rmc(_) => SentenceType::Rmc,
            NmeaSentence::Vtg(_) => SentenceType::Vtg,
            NmeaSentence::Zda(_) => SentenceType::Zda,
        }
    }
}

macro_rules! parsable_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $char:literal => $variant:ident = $code:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        ///
        /// An absent field holds [`Unknown`](Self::Unknown), whose numeric code
        /// is `-1`.
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
            /// Sentinel of an absent field
            #[default]
            Unknown,
        }

        impl $name {
            /// Looks up the variant transmitted as `c`.
            pub fn from_char(c: char) -> Option<Self> {
                match c {
                    $($char => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Returns the transmitted character, or `None` for the sentinel.
            pub fn as_char(self) -> Option<char> {
                match self {
                    $(Self::$variant => Some($char),)*
                    Self::Unknown => None,
                }
            }

            /// Returns the numeric code of the variant, `-1` for the sentinel.
            pub fn code(self) -> i32 {
                match self {
                    $(Self::$variant => $code,)*
                    Self::Unknown => -1,
                }
            }
        }

        impl FieldDecode for $name {
            fn decode(field: &str) -> Option<Self> {
                char::decode(field).and_then(Self::from_char)
            }
        }
    };
}

parsable_enum! {
    /// Status Mode Indicator
    pub enum Status {
        /// A - Valid
        'A' => Valid = 1,
        /// V - Invalid
        'V' => Invalid = 0,
    }
}

parsable_enum! {
    /// FAA Mode Indicator
    ///
    /// <https://gpsd.gitlab.io/gpsd/NMEA.html#_sentence_mixes_and_nmea_variations>
    pub enum PositioningMode {
        /// A - Autonomous mode
        'A' => Autonomous = 0,
        /// D - Differential Mode
        'D' => Differential = 1,
        /// E - Estimated (dead-reckoning) mode
        'E' => Estimated = 2,
        /// N - Data Not Valid
        'N' => DataNotValid = 3,
        /// M - Manual Input Mode
        'M' => Manual = 4,
        /// S - Simulated Mode
        'S' => Simulator = 5,
    }
}

impl PositioningMode {
    /// Returns `true` for the modes a VTG sentence may carry (`A`, `D`, `E`, `N`).
    pub fn is_track_mode(self) -> bool {
        matches!(
            self,
            Self::Autonomous | Self::Differential | Self::Estimated | Self::DataNotValid
        )
    }
}

parsable_enum! {
    /// Quality of the GPS fix
    pub enum Quality {
        /// 0 - Fix not available
        '0' => NoFix = 0,
        /// 1 - GPS fix
        '1' => GPSFix = 1,
        /// 2 - Differential GPS fix
        '2' => DGPSFix = 2,
        /// 3 - PPS fix
        '3' => PPSFix = 3,
        /// 4 - Real Time Kinematic
        '4' => RTK = 4,
        /// 5 - Float RTK
        '5' => FloatRTK = 5,
        /// 6 - estimated (dead reckoning)
        '6' => Estimated = 6,
        /// 7 - Manual input mode
        '7' => Manual = 7,
        /// 8 - Simulation mode
        '8' => Simulation = 8,
    }
}

parsable_enum! {
    /// Selection Mode
    pub enum SelectionMode {
        /// M - Manual, forced to operate in 2D or 3D
        'M' => Manual = 1,
        /// A - Automatic, 2D/3D
        'A' => Automatic = 2,
    }
}

parsable_enum! {
    /// Fix Mode
    pub enum FixMode {
        /// 1 - No fix
        '1' => NoFix = 1,
        /// 2 - 2D Fix
        '2' => Fix2D = 2,
        /// 3 - 3D Fix
        '3' => Fix3D = 3,
    }
}
