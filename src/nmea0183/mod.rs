//! # NMEA 0183 Sentence Framing
//!
//! This module isolates the parts of a sentence that every parser needs before
//! any field is decoded. It handles the standard NMEA 0183 format:
//! `$<talker><type>,D1,D2,...,Dn*CC`
//!
//! Framing checks, in order:
//! 1. The three-character type code following the talker ID matches the
//!    expected sentence type.
//! 2. A `*` checksum delimiter is present.
//! 3. The content between `$` and `*` fits the working buffer.
//! 4. Optionally, the checksum matches the content (see [`ChecksumMode`]).

use core::fmt;

use nom::{
    AsChar, Parser,
    bytes::complete::{take_until, take_while_m_n},
    combinator::all_consuming,
    number::complete::hex_u32,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result, parsing::Tokenizer};

/// Size of the working buffer holding the content between `$` and `*`.
///
/// Sentences whose content is this long or longer are rejected with
/// [`Error::WorkingBufferOverflow`].
pub const WORKING_BUFFER_CAPACITY: usize = 256;

/// Maximum number of data fields retained from one sentence.
///
/// Fields beyond this position are ignored; no supported sentence type defines
/// that many.
pub const MAX_FIELDS: usize = 24;

/// The sentence types understood by the decoder.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentenceType {
    /// Recommended Minimum Navigation Information
    Rmc,
    /// Global Positioning System Fix Data
    Gga,
    /// Geographic Position - Latitude/Longitude
    Gll,
    /// Track made good and Ground speed
    Vtg,
    /// Time & Date - UTC, day, month, year and local time zone
    Zda,
    /// GNSS DOP and active satellites
    Gsa,
    /// Satellites in View
    Gsv,
}

impl SentenceType {
    /// Returns the three-character type code, e.g. `"RMC"`.
    pub fn code(self) -> &'static str {
        match self {
            SentenceType::Rmc => "RMC",
            SentenceType::Gga => "GGA",
            SentenceType::Gll => "GLL",
            SentenceType::Vtg => "VTG",
            SentenceType::Zda => "ZDA",
            SentenceType::Gsa => "GSA",
            SentenceType::Gsv => "GSV",
        }
    }

    /// Looks up a sentence type by its three-character code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "RMC" => Some(SentenceType::Rmc),
            "GGA" => Some(SentenceType::Gga),
            "GLL" => Some(SentenceType::Gll),
            "VTG" => Some(SentenceType::Vtg),
            "ZDA" => Some(SentenceType::Zda),
            "GSA" => Some(SentenceType::Gsa),
            "GSV" => Some(SentenceType::Gsv),
            _ => None,
        }
    }

    /// Identifies the type of a raw sentence.
    ///
    /// The type code is the three characters at offset 3 (after `$` and the
    /// two-character talker ID) and must be followed by a `,`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nmea0183_epoch::SentenceType;
    ///
    /// assert_eq!(SentenceType::identify("$GNGGA,,,*00"), Some(SentenceType::Gga));
    /// assert_eq!(SentenceType::identify("$GPTXT,01,01,02*00"), None);
    /// assert_eq!(SentenceType::identify("$GPGGA*00"), None);
    /// ```
    pub fn identify(sentence: &str) -> Option<Self> {
        type_code(sentence).and_then(SentenceType::from_code)
    }
}

impl fmt::Display for SentenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returns the raw type code of a sentence, if it has the `$XXYYY,` shape.
pub fn type_code(sentence: &str) -> Option<&str> {
    sentence.get(3..7)?.strip_suffix(',')
}

/// The two-character talker ID identifying the transmitting constellation.
///
/// Common talkers are `GP` (GPS), `GL` (GLONASS), `GA` (Galileo), `GB`/`BD`
/// (BeiDou) and `GN` (combined GNSS).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Talker([u8; 2]);

impl Talker {
    /// Reads the talker ID from a raw sentence (the two bytes after `$`).
    pub fn of(sentence: &str) -> Option<Self> {
        match sentence.as_bytes() {
            [_, a, b, ..] if a.is_ascii() && b.is_ascii() => Some(Talker([*a, *b])),
            _ => None,
        }
    }

    /// Returns the talker ID as a string slice.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.0).unwrap_or("??")
    }
}

impl fmt::Display for Talker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defines how the parser should handle NMEA message checksums.
///
/// The checksum is a two-digit hexadecimal value representing the XOR of all
/// bytes between the `$` prefix and the `*` delimiter.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumMode {
    #[default]
    /// The `*` delimiter must be present, but the checksum value is not checked.
    ///
    /// This is the default: a sentence with a wrong checksum decodes normally.
    Ignore,

    /// The `*` delimiter must be followed by a checksum matching the content.
    ///
    /// A carriage return after the two hex digits is tolerated. Sentences with
    /// a malformed or wrong checksum are rejected.
    Verify,
}

/// Calculates the NMEA 0183 checksum of the given sentence content.
///
/// `content` is everything between `$` and `*`, excluding both.
///
/// # Examples
///
/// ```rust
/// use nmea0183_epoch::checksum;
///
/// assert_eq!(checksum("GPGGA,123456,data"), 0x41);
/// ```
pub fn checksum(content: &str) -> u8 {
    content
        .as_bytes()
        .iter()
        .fold(0u8, |accumulated_xor, &byte| accumulated_xor ^ byte)
}

/// Parses the two hexadecimal digits following `*`.
fn transmitted_checksum(tail: &str) -> Option<u8> {
    let digits = tail.trim_end_matches(['\r', '\n']);
    let result: nom::IResult<&str, u32> =
        all_consuming(take_while_m_n(2, 2, |c: char| c.is_hex_digit()).and_then(hex_u32))
            .parse(digits);

    result.ok().map(|(_, cc)| cc as u8)
}

/// A sentence that passed framing, split into its positional fields.
///
/// Fields are numbered from `1`, matching the NMEA field diagrams: for
/// `$GPGLL,4916.45,N,...`, field `1` is `4916.45` and field `2` is `N`.
/// Fields past the end of the sentence read as empty. A trailing `,` before the
/// `*` counts as one more (empty) field.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    talker: Talker,
    system_id: char,
    checksum: Option<u8>,
    fields: heapless::Vec<&'a str, MAX_FIELDS>,
}

impl<'a> Frame<'a> {
    /// Frames `sentence` as a sentence of type `expected`.
    ///
    /// # Errors
    ///
    /// - [`Error::TypeMismatch`] if the type code is not `expected`
    /// - [`Error::MissingChecksumDelimiter`] if no `*` is present
    /// - [`Error::WorkingBufferOverflow`] if the content does not fit
    ///   [`WORKING_BUFFER_CAPACITY`]
    /// - [`Error::MalformedChecksum`] / [`Error::ChecksumMismatch`] with
    ///   [`ChecksumMode::Verify`] only
    pub fn split(sentence: &'a str, expected: SentenceType, mode: ChecksumMode) -> Result<Self> {
        if SentenceType::identify(sentence) != Some(expected) {
            return Err(Error::TypeMismatch { expected });
        }

        let result: nom::IResult<&str, &str> = take_until("*").parse(sentence);
        let (tail, head) = result.map_err(|_| Error::MissingChecksumDelimiter)?;

        // `head` starts with the `$` prefix, `tail` with the `*` delimiter.
        let content = head.get(1..).unwrap_or_default();
        if content.len() >= WORKING_BUFFER_CAPACITY {
            return Err(Error::WorkingBufferOverflow {
                len: content.len(),
                capacity: WORKING_BUFFER_CAPACITY,
            });
        }

        let checksum = transmitted_checksum(tail.get(1..).unwrap_or_default());
        if mode == ChecksumMode::Verify {
            let found = checksum.ok_or(Error::MalformedChecksum)?;
            let expected = self::checksum(content);
            if found != expected {
                return Err(Error::ChecksumMismatch { expected, found });
            }
        }

        let mut tokens = Tokenizer::new(content, ',');
        // The address field (talker + type) was checked above.
        let _ = tokens.next();

        let mut fields = heapless::Vec::new();
        for token in tokens {
            if fields.push(token).is_err() {
                break;
            }
        }
        // The tokenizer drops a trailing empty token, but here it is a field.
        if content.ends_with(',') {
            let _ = fields.push("");
        }

        Ok(Frame {
            talker: Talker::of(sentence).unwrap_or_default(),
            system_id: sentence.chars().nth(2).unwrap_or('\0'),
            checksum,
            fields,
        })
    }

    /// Returns the talker ID of the sentence.
    pub fn talker(&self) -> Talker {
        self.talker
    }

    /// Returns the system identifier: the second talker character (`P` for `GP`).
    pub fn system_id(&self) -> char {
        self.system_id
    }

    /// Returns the transmitted checksum, if it is two well-formed hex digits.
    pub fn checksum(&self) -> Option<u8> {
        self.checksum
    }

    /// Returns field `n` (1-based), or `""` if the sentence is shorter.
    pub fn field(&self, n: usize) -> &'a str {
        n.checked_sub(1)
            .and_then(|i| self.fields.get(i))
            .copied()
            .unwrap_or_default()
    }

    /// Returns the number of fields present in the sentence.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the sentence carries no data fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
