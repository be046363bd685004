//! # NMEA Content
//!
//! Typed records for the seven supported sentence types and the shared value
//! types they are built from.
//!
//! Every record is decoded leniently: each field is decoded and validated on
//! its own, and a field that is empty, malformed or out of range is simply left
//! absent (see [`Field`](crate::Field)). Only framing problems reject a sentence.

mod parse;
mod sentences;

pub use parse::CENTURY_PIVOT;
pub use sentences::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Time of day in UTC, as transmitted (`hhmmss.ss`).
///
/// The sentinel value held by an absent time field has every component set
/// to `-1`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtcTime {
    /// Hour of day
    pub hour: i32,
    /// Minute of hour
    pub minute: i32,
    /// Seconds, including the fractional part
    pub second: f64,
}

impl UtcTime {
    /// Sentinel held by absent time fields.
    pub const SENTINEL: UtcTime = UtcTime {
        hour: -1,
        minute: -1,
        second: -1.0,
    };

    /// Returns `true` if the time lies within `00:00:00` and `23:59:60`
    /// (seconds exclusive).
    pub fn is_valid(&self) -> bool {
        (0..=23).contains(&self.hour)
            && (0..=59).contains(&self.minute)
            && (0.0..60.0).contains(&self.second)
    }

    /// Returns the time of day in hours, e.g. `12.588611` for `12:35:19`.
    ///
    /// Returns `-1.0` for the sentinel and any other time that is not a valid
    /// time of day.
    ///
    /// ```rust
    /// use nmea0183_epoch::UtcTime;
    ///
    /// let time = UtcTime { hour: 12, minute: 30, second: 36.0 };
    /// assert!((time.fractional_hours() - 12.51).abs() < 1e-9);
    /// assert_eq!(UtcTime::SENTINEL.fractional_hours(), -1.0);
    /// ```
    pub fn fractional_hours(&self) -> f64 {
        if !self.is_valid() {
            return -1.0;
        }

        self.hour as f64 + self.minute as f64 / 60.0 + self.second / 3600.0
    }

    /// Converts to [`time::Time`], or `None` if the time is not a valid time
    /// of day.
    pub fn to_time(&self) -> Option<time::Time> {
        if !self.is_valid() {
            return None;
        }

        let whole = self.second.trunc();
        let nanos = ((self.second - whole) * 1e9).round().min(999_999_999.0);

        time::Time::from_hms_nano(
            self.hour as u8,
            self.minute as u8,
            whole as u8,
            nanos as u32,
        )
        .ok()
    }
}

/// Calendar date in UTC.
///
/// The sentinel value held by an absent date field has every component set
/// to `-1`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    /// Full year, e.g. `1994`
    pub year: i32,
    /// Month, `1` to `12`
    pub month: i32,
    /// Day of month
    pub day: i32,
}

impl CalendarDate {
    /// Sentinel held by absent date fields.
    pub const SENTINEL: CalendarDate = CalendarDate {
        year: -1,
        month: -1,
        day: -1,
    };

    /// Converts to [`time::Date`], or `None` if the date does not exist.
    pub fn to_date(&self) -> Option<time::Date> {
        let month = u8::try_from(self.month).ok()?.try_into().ok()?;
        let day = u8::try_from(self.day).ok()?;

        time::Date::from_calendar_date(self.year, month, day).ok()
    }
}

/// Local time zone, as an offset from UTC.
///
/// An absent zone holds `00:00`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeZone {
    /// Offset hours, `-13` to `13`
    pub hours: i32,
    /// Offset minutes
    pub minutes: i32,
}

impl TimeZone {
    /// Converts to [`time::UtcOffset`].
    ///
    /// The minutes take the sign of the hours, so `-08:30` is eight and a half
    /// hours behind UTC.
    pub fn to_utc_offset(&self) -> Option<time::UtcOffset> {
        let minutes = if self.hours < 0 {
            -self.minutes.abs()
        } else {
            self.minutes
        };

        time::UtcOffset::from_hms(
            i8::try_from(self.hours).ok()?,
            i8::try_from(minutes).ok()?,
            0,
        )
        .ok()
    }
}

/// A latitude or longitude.
///
/// NMEA transmits coordinates as degrees and decimal minutes (`DDDMM.MMMM`).
/// The decoder keeps both halves alongside the signed decimal value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Decimal degrees, negative south of the equator or west of Greenwich
    pub decimal: f64,
    /// Whole degrees, as transmitted (unsigned)
    pub degrees: f64,
    /// Decimal minutes, as transmitted (unsigned)
    pub minutes: f64,
}

impl Coordinate {
    /// Sentinel held by absent coordinate fields.
    pub const SENTINEL: Coordinate = Coordinate {
        decimal: f64::NAN,
        degrees: f64::NAN,
        minutes: f64::NAN,
    };

    /// Splits a `DDDMM.MMMM` value into degrees and minutes.
    ///
    /// ```rust
    /// use nmea0183_epoch::Coordinate;
    ///
    /// let lat = Coordinate::from_degrees_minutes(4807.038);
    /// assert_eq!(lat.degrees, 48.0);
    /// assert!((lat.decimal - 48.1173).abs() < 1e-9);
    /// ```
    pub fn from_degrees_minutes(dm: f64) -> Self {
        let degrees = (dm / 100.0).floor();
        let minutes = dm - degrees * 100.0;

        Coordinate {
            decimal: degrees + minutes / 60.0,
            degrees,
            minutes,
        }
    }

    /// Returns the coordinate with its decimal value negated.
    pub fn negated(self) -> Self {
        Coordinate {
            decimal: -self.decimal,
            ..self
        }
    }
}
