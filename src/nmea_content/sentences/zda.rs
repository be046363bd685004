#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Field, FieldDecode,
    nmea0183::{Frame, SentenceType},
    nmea_content::{CalendarDate, Parsable, TimeZone, UtcTime, parse::checked_time},
};

/// ZDA - Time & Date - UTC, day, month, year and local time zone
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_zda_time_date_utc_day_month_year_and_local_time_zone>
///
/// ```text
///         1         2  3  4    5  6
///         |         |  |  |    |  |
///  $--ZDA,hhmmss.ss,xx,xx,xxxx,xx,xx*hh<CR><LF>
/// ```
///
/// Two-digit years are read as 20xx. The date is present only when day, month
/// and year are all given and positive; the zone is present when either of its
/// fields is given.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct ZdaRecord {
    /// Time in UTC
    pub time: Field<UtcTime>,
    /// Date in UTC
    pub date: Field<CalendarDate>,
    /// Local zone description, offset from UTC
    pub timezone: Field<TimeZone>,
}

impl Default for ZdaRecord {
    fn default() -> Self {
        ZdaRecord {
            time: Field::absent(UtcTime::SENTINEL),
            date: Field::absent(CalendarDate::SENTINEL),
            timezone: Field::absent(TimeZone::default()),
        }
    }
}

impl ZdaRecord {
    /// Combines date, time and zone into a [`time::OffsetDateTime`].
    ///
    /// Returns `None` unless the date and time are present and valid. An
    /// absent zone is taken as UTC.
    ///
    /// ```rust
    /// use nmea0183_epoch::{Parsable, ZdaRecord};
    ///
    /// let zda = ZdaRecord::parse("$GPZDA,201530.00,04,07,2002,-05,00*60").unwrap();
    /// let dt = zda.to_offset_date_time().unwrap();
    /// assert_eq!(dt.year(), 2002);
    /// assert_eq!(dt.offset().whole_hours(), -5);
    /// ```
    pub fn to_offset_date_time(&self) -> Option<time::OffsetDateTime> {
        let date = self.date.get()?.to_date()?;
        let time = self.time.get()?.to_time()?;
        let offset = match self.timezone.get() {
            Some(zone) => zone.to_utc_offset()?,
            None => time::UtcOffset::UTC,
        };

        Some(time::PrimitiveDateTime::new(date, time).assume_offset(offset))
    }
}

impl From<time::OffsetDateTime> for ZdaRecord {
    fn from(value: time::OffsetDateTime) -> Self {
        let offset = value.offset();
        let second = value.second() as f64 + value.nanosecond() as f64 / 1e9;

        ZdaRecord {
            time: Field::present(UtcTime {
                hour: value.hour() as i32,
                minute: value.minute() as i32,
                second,
            }),
            date: Field::present(CalendarDate {
                year: value.year(),
                month: u8::from(value.month()) as i32,
                day: value.day() as i32,
            }),
            timezone: Field::present(TimeZone {
                hours: offset.whole_hours() as i32,
                minutes: offset.minutes_past_hour().abs() as i32,
            }),
        }
    }
}

impl Parsable for ZdaRecord {
    const SENTENCE_TYPE: SentenceType = SentenceType::Zda;

    fn from_frame(frame: &Frame<'_>) -> Self {
        let mut zda = ZdaRecord::default();

        zda.time.assign(checked_time(frame.field(1)));

        let day = i32::decode(frame.field(2));
        let month = i32::decode(frame.field(3));
        let year = i32::decode(frame.field(4)).map(|y| if y < 100 { y + 2000 } else { y });
        if let (Some(day), Some(month), Some(year)) = (day, month, year) {
            if day > 0 && month > 0 && year > 0 {
                zda.date.set(CalendarDate { year, month, day });
            }
        }

        let hours = i32::decode(frame.field(5));
        let minutes = i32::decode(frame.field(6));
        if hours.is_some() || minutes.is_some() {
            zda.timezone.set(TimeZone {
                hours: hours.unwrap_or(0),
                minutes: minutes.unwrap_or(0),
            });
        }

        zda
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fields_present() {
        let zda = ZdaRecord::parse("$GPZDA,100000,15,03,2024,+01,30*00").unwrap();

        let time = zda.time.get().unwrap();
        assert_eq!((time.hour, time.minute, time.second), (10, 0, 0.0));
        assert_eq!(
            zda.date.get(),
            Some(CalendarDate {
                year: 2024,
                month: 3,
                day: 15
            })
        );
        assert_eq!(
            zda.timezone.get(),
            Some(TimeZone {
                hours: 1,
                minutes: 30
            })
        );

        let offset = zda.timezone.get().unwrap().to_utc_offset().unwrap();
        assert_eq!(offset.whole_minutes(), 90);
    }

    #[test]
    fn test_date_presence() {
        let cases = [
            ("$GPZDA,123519,04,07,2025,,*43", Some((2025, 7, 4))),
            ("$GPZDA,123519,04,07,25,,*00", Some((2025, 7, 4))),
            ("$GPZDA,123519,04,07,99,,*00", Some((2099, 7, 4))),
            ("$GPZDA,123519,0,07,2025,,*00", None),
            ("$GPZDA,123519,04,0,2025,,*00", None),
            ("$GPZDA,123519,04,07,,,*00", None),
            ("$GPZDA,123519,,07,2025,,*00", None),
        ];

        for (input, expected) in cases {
            let zda = ZdaRecord::parse(input).unwrap();
            let date = zda.date.get().map(|d| (d.year, d.month, d.day));
            assert_eq!(date, expected, "Failed: {input:?}");
            assert!(zda.time.is_present(), "Failed: {input:?}");
        }
    }

    #[test]
    fn test_timezone_presence() {
        let cases = [
            ("$GPZDA,153045,20,11,2023,-08,00*00", Some((-8, 0))),
            ("$GPZDA,153045,20,11,2023,05,*00", Some((5, 0))),
            ("$GPZDA,153045,20,11,2023,,45*00", Some((0, 45))),
            ("$GPZDA,153045,20,11,2023,,*00", None),
            ("$GPZDA,153045,20,11,2023*00", None),
        ];

        for (input, expected) in cases {
            let zda = ZdaRecord::parse(input).unwrap();
            let zone = zda.timezone.get().map(|z| (z.hours, z.minutes));
            assert_eq!(zone, expected, "Failed: {input:?}");
        }

        let absent = ZdaRecord::default();
        assert_eq!(absent.timezone.raw(), TimeZone::default());
    }

    #[test]
    fn test_time_range_checked() {
        let zda = ZdaRecord::parse("$GPZDA,246000,15,03,2024,,*00").unwrap();
        assert!(!zda.time.is_present());
        assert!(zda.date.is_present());
        assert_eq!(zda.to_offset_date_time(), None);
    }

    #[test]
    fn test_offset_date_time_round_trip() {
        let zda = ZdaRecord::parse("$GPZDA,201530.50,04,07,2002,-03,30*00").unwrap();
        let dt = zda.to_offset_date_time().unwrap();

        assert_eq!(dt.hour(), 20);
        assert_eq!(dt.millisecond(), 500);
        assert_eq!(dt.offset().whole_minutes(), -210);
        assert_eq!(ZdaRecord::from(dt), zda);
    }
}
