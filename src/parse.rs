use core::ops::RangeBounds;

use nom::{
    Parser,
    character::complete::anychar,
    combinator::all_consuming,
    number::complete::double,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A decoded sentence field: a value paired with its presence flag.
///
/// Every field of every record is a `Field`. When the field was empty, missing
/// from the sentence, or outside its validated range, the presence flag is
/// `false` and the value holds the field's sentinel (`-1` for categorical and
/// integer fields, `NaN` for positions and angles). The sentinel exists for
/// display compatibility only: consumers test presence with
/// [`Field::is_present`] or [`Field::get`], never by comparing against the
/// sentinel.
///
/// Two fields compare equal when both are absent, or both are present with equal
/// values; the sentinel never takes part in the comparison.
///
/// # Examples
///
/// ```rust
/// use nmea0183_epoch::Field;
///
/// let mut speed = Field::absent(-1.0);
/// assert_eq!(speed.get(), None);
/// assert_eq!(speed.raw(), -1.0);
///
/// assert!(speed.decode_in("022.4", 0.0..=999.9));
/// assert_eq!(speed.get(), Some(22.4));
///
/// let mut course = Field::absent(-1.0);
/// assert!(!course.decode_in("400.0", 0.0..360.0));
/// assert!(!course.is_present());
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct Field<T> {
    value: T,
    present: bool,
}

impl<T: Copy> Field<T> {
    /// Creates an absent field holding `sentinel`.
    pub const fn absent(sentinel: T) -> Self {
        Field {
            value: sentinel,
            present: false,
        }
    }

    /// Creates a present field holding `value`.
    pub const fn present(value: T) -> Self {
        Field {
            value,
            present: true,
        }
    }

    /// Stores `value` and marks the field present.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.present = true;
    }

    /// Stores `value` if it is `Some`, leaving the field untouched otherwise.
    ///
    /// Returns `true` if the field was set.
    pub fn assign(&mut self, value: Option<T>) -> bool {
        match value {
            Some(value) => {
                self.set(value);
                true
            }
            None => false,
        }
    }

    /// Returns the value if the field is present.
    pub fn get(&self) -> Option<T> {
        self.present.then_some(self.value)
    }

    /// Returns `true` if the field carries a decoded value.
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Returns the stored value, which is the sentinel when the field is absent.
    pub fn raw(&self) -> T {
        self.value
    }
}

impl<T: FieldDecode + Copy> Field<T> {
    /// Decodes `raw` into the field without a range check.
    ///
    /// Returns `true` if the field was set. An empty or undecodable `raw` leaves
    /// the field untouched.
    pub fn decode(&mut self, raw: &str) -> bool {
        self.assign(T::decode(raw))
    }
}

impl<T: FieldDecode + PartialOrd + Copy> Field<T> {
    /// Decodes `raw` and stores it if the value lies in `range`.
    ///
    /// Returns `true` if the field was set. An empty, undecodable or
    /// out-of-range `raw` leaves the field untouched.
    pub fn decode_in<R: RangeBounds<T>>(&mut self, raw: &str, range: R) -> bool {
        self.assign(T::decode(raw).filter(|value| range.contains(value)))
    }
}

impl<T: PartialEq> PartialEq for Field<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.present, other.present) {
            (true, true) => self.value == other.value,
            (false, false) => true,
            _ => false,
        }
    }
}

/// Trait for types that can be decoded from one raw NMEA 0183 field.
///
/// A field decodes only if its whole text is consumed: `"12"` decodes as an
/// integer, `"12x"` and `""` do not. Floating point fields must be finite.
///
/// # Examples
///
/// ```rust
/// use nmea0183_epoch::FieldDecode;
///
/// assert_eq!(i32::decode("08"), Some(8));
/// assert_eq!(i32::decode("8a"), None);
/// assert_eq!(f64::decode("4807.038"), Some(4807.038));
/// assert_eq!(f64::decode(""), None);
/// assert_eq!(char::decode("A"), Some('A'));
/// assert_eq!(char::decode("AV"), None);
/// ```
pub trait FieldDecode: Sized {
    /// Decodes `field`, returning `None` if it is empty or malformed.
    fn decode(field: &str) -> Option<Self>;
}

macro_rules! impl_ints_decode {
    ($($t:tt),*) => ($(
        impl FieldDecode for $t {
            fn decode(field: &str) -> Option<Self> {
                let result: nom::IResult<_, _> =
                    all_consuming(nom::character::complete::$t).parse(field);
                result.ok().map(|(_, value)| value)
            }
        }
    )*)
}

impl_ints_decode!(u8, u16, i32);

impl FieldDecode for f64 {
    fn decode(field: &str) -> Option<Self> {
        let result: nom::IResult<_, _> = all_consuming(double).parse(field);
        result
            .ok()
            .map(|(_, value)| value)
            .filter(|value| value.is_finite())
    }
}

impl FieldDecode for char {
    fn decode(field: &str) -> Option<Self> {
        let result: nom::IResult<_, _> = all_consuming(anychar).parse(field);
        result.ok().map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ints() {
        assert_eq!(i32::decode("0"), Some(0));
        assert_eq!(i32::decode("-12"), Some(-12));
        assert_eq!(i32::decode("4095"), Some(4095));
        assert_eq!(u8::decode("99"), Some(99));
        assert_eq!(u8::decode("256"), None);

        for input in ["", " 1", "1.5", "x", "12x"] {
            assert_eq!(i32::decode(input), None, "Failed: {input:?}");
        }
    }

    #[test]
    fn test_decode_floats() {
        assert_eq!(f64::decode("022.4"), Some(22.4));
        assert_eq!(f64::decode("-9999.9"), Some(-9999.9));
        assert_eq!(f64::decode("0"), Some(0.0));

        for input in ["", "abc", "1.0.0", "nan", "inf", "1.5M"] {
            assert_eq!(f64::decode(input), None, "Failed: {input:?}");
        }
    }

    #[test]
    fn test_field_range() {
        let mut field = Field::absent(-1);
        assert!(!field.decode_in("9", 0..=8));
        assert!(!field.is_present());
        assert_eq!(field.raw(), -1);

        assert!(field.decode_in("8", 0..=8));
        assert_eq!(field.get(), Some(8));
    }

    #[test]
    fn test_field_equality_ignores_sentinel() {
        let a: Field<f64> = Field::absent(f64::NAN);
        let b: Field<f64> = Field::absent(-1.0);
        assert_eq!(a, b);
        assert_ne!(a, Field::present(1.0));
        assert_eq!(Field::present(1.0), Field::present(1.0));
    }
}
