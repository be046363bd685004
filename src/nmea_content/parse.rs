use nom::{
    AsChar, Parser,
    bytes::complete::take_while_m_n,
    character::complete::i32,
    combinator::all_consuming,
    number::complete::double,
};

use crate::{
    Field, FieldDecode,
    nmea0183::SentenceType,
    nmea_content::{CalendarDate, Coordinate, UtcTime},
};

/// Two-digit years at or above this value belong to the 1900s.
///
/// GPS week numbering starts in 1980; receivers in the field report `83` and
/// later as 1983 onwards, and `00` to `82` as 2000 to 2082.
pub const CENTURY_PIVOT: i32 = 83;

fn two_digits(i: &str) -> nom::IResult<&str, i32> {
    take_while_m_n(2, 2, |c: char| c.is_dec_digit())
        .and_then(i32)
        .parse(i)
}

impl FieldDecode for UtcTime {
    /// Decodes `hhmmss` or `hhmmss.ss` without a range check.
    fn decode(field: &str) -> Option<Self> {
        let result: nom::IResult<_, _> = (two_digits, two_digits).parse(field);
        let (seconds, (hour, minute)) = result.ok()?;

        // Whole seconds are always two digits; the fraction is optional.
        two_digits(seconds).ok()?;
        let result: nom::IResult<_, _> = all_consuming(double).parse(seconds);
        let (_, second) = result.ok()?;

        (second.is_finite() && second >= 0.0).then_some(UtcTime {
            hour,
            minute,
            second,
        })
    }
}

impl FieldDecode for CalendarDate {
    /// Decodes `ddmmyy`, resolving the century with [`CENTURY_PIVOT`].
    fn decode(field: &str) -> Option<Self> {
        let result: nom::IResult<_, _> =
            all_consuming((two_digits, two_digits, two_digits)).parse(field);
        let (_, (day, month, year)) = result.ok()?;

        if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
            return None;
        }

        let year = match year {
            CENTURY_PIVOT..=99 => 1900 + year,
            _ => 2000 + year,
        };

        Some(CalendarDate { year, month, day })
    }
}

/// Decodes a time field, keeping it only if it is a valid time of day.
pub(crate) fn checked_time(raw: &str) -> Option<UtcTime> {
    UtcTime::decode(raw).filter(UtcTime::is_valid)
}

/// Decodes a hemisphere indicator: `Some(true)` for `positive`, `Some(false)`
/// for `negative`.
pub(crate) fn hemisphere(raw: &str, positive: char, negative: char) -> Option<bool> {
    match char::decode(raw)? {
        c if c == positive => Some(true),
        c if c == negative => Some(false),
        _ => None,
    }
}

/// Decodes a `DDDMM.MMMM` coordinate and its hemisphere indicator.
///
/// The coordinate is present only if the raw value is greater than zero. The
/// hemisphere is recorded on its own and flips the sign of the decimal value
/// for the `negative` indicator.
pub(crate) fn position(
    coordinate: &mut Field<Coordinate>,
    is_positive: &mut Field<bool>,
    raw: &str,
    raw_hemisphere: &str,
    (positive, negative): (char, char),
) {
    let side = hemisphere(raw_hemisphere, positive, negative);
    is_positive.assign(side);

    coordinate.assign(
        f64::decode(raw)
            .filter(|&dm| dm > 0.0)
            .map(Coordinate::from_degrees_minutes)
            .map(|c| if side == Some(false) { c.negated() } else { c }),
    );
}

/// Checks a unit indicator, logging a mismatch without rejecting anything.
pub(crate) fn expect_unit(sentence: SentenceType, field: usize, raw: &str, unit: char) {
    if !raw.is_empty() && char::decode(raw) != Some(unit) {
        log::debug!("{sentence} field {field}: expected unit '{unit}', found {raw:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractional_hours() {
        let cases = [
            ("000000", 0.0),
            ("123519", 12.0 + 35.0 / 60.0 + 19.0 / 3600.0),
            ("180000.00", 18.0),
            ("250000", -1.0),
        ];

        for (input, expected) in cases {
            let time = UtcTime::decode(input).unwrap();
            assert!((time.fractional_hours() - expected).abs() < 1e-12, "Failed: {input:?}");
        }

        assert_eq!(UtcTime::SENTINEL.fractional_hours(), -1.0);
    }

    #[test]
    fn test_utc_time() {
        let cases = [
            ("123519", Some((12, 35, 19.0))),
            ("092725.00", Some((9, 27, 25.0))),
            ("235959.999", Some((23, 59, 59.999))),
            ("250000", Some((25, 0, 0.0))),
            ("12351", None),
            ("1235", None),
            ("ab3519", None),
            ("", None),
        ];

        for (input, expected) in cases {
            let result = UtcTime::decode(input).map(|t| (t.hour, t.minute, t.second));
            assert_eq!(result, expected, "Failed: {input:?}");
        }

        assert!(checked_time("235959.99").is_some());
        assert!(checked_time("240000").is_none());
        assert!(checked_time("126000").is_none());
        assert!(checked_time("125960").is_none());
    }

    #[test]
    fn test_calendar_date() {
        let cases = [
            ("230394", Some((1994, 3, 23))),
            ("010100", Some((2000, 1, 1))),
            ("311282", Some((2082, 12, 31))),
            ("010183", Some((1983, 1, 1))),
            ("001225", None),
            ("011325", None),
            ("0101", None),
            ("01012025", None),
        ];

        for (input, expected) in cases {
            let result = CalendarDate::decode(input).map(|d| (d.year, d.month, d.day));
            assert_eq!(result, expected, "Failed: {input:?}");
        }
    }

    #[test]
    fn test_position() {
        let cases = [
            ("4807.038", "N", Some(48.1173), Some(true)),
            ("4807.038", "S", Some(-48.1173), Some(false)),
            ("4807.038", "", Some(48.1173), None),
            ("4807.038", "X", Some(48.1173), None),
            ("0000.000", "N", None, Some(true)),
            ("", "N", None, Some(true)),
            ("", "", None, None),
        ];

        for (raw, hemi, expected, north) in cases {
            let mut coordinate = Field::absent(Coordinate::SENTINEL);
            let mut is_north = Field::absent(false);
            position(&mut coordinate, &mut is_north, raw, hemi, ('N', 'S'));

            let decimal = coordinate.get().map(|c| c.decimal);
            match (decimal, expected) {
                (Some(found), Some(expected)) => {
                    assert!((found - expected).abs() < 1e-9, "Failed: {raw:?} {hemi:?}")
                }
                (found, expected) => assert_eq!(found, expected, "Failed: {raw:?} {hemi:?}"),
            }
            assert_eq!(is_north.get(), north, "Failed: {raw:?} {hemi:?}");
        }
    }
}
