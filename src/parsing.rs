//! # Tokenizer
//!
//! This module provides the delimiter splitter used at both levels of the
//! decoder: splitting an epoch buffer into sentences on `\n`, and splitting a
//! sentence into fields on `,`.

use core::iter::FusedIterator;

use nom::{
    Parser,
    bytes::complete::take_till,
    character::complete::char,
    combinator::opt,
    sequence::terminated,
};

/// Splits an input span on a single-character delimiter, consuming it in place.
///
/// Each call to [`Iterator::next`] takes the text up to the next delimiter and
/// advances past the delimiter, so the unconsumed remainder is always available
/// through [`Tokenizer::rest`]. Empty tokens between two adjacent delimiters are
/// yielded as `""`; a delimiter at the very end of the input does not produce a
/// trailing empty token. A final token that is not followed by a delimiter is
/// still yielded.
///
/// # Examples
///
/// ```rust
/// use nmea0183_epoch::parsing::Tokenizer;
///
/// let fields: Vec<_> = Tokenizer::new("GPGSA,A,3,,,1.5", ',').collect();
/// assert_eq!(fields, ["GPGSA", "A", "3", "", "", "1.5"]);
///
/// let lines: Vec<_> = Tokenizer::new("$GPGGA*00\n$GPGLL*00\n", '\n').collect();
/// assert_eq!(lines, ["$GPGGA*00", "$GPGLL*00"]);
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    rest: &'a str,
    delimiter: char,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer over `input` splitting on `delimiter`.
    pub fn new(input: &'a str, delimiter: char) -> Self {
        Tokenizer {
            rest: input,
            delimiter,
        }
    }

    /// Returns the part of the input not consumed yet.
    pub fn rest(&self) -> &'a str {
        self.rest
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let delimiter = self.delimiter;
        let result: nom::IResult<&str, &str> =
            terminated(take_till(move |c| c == delimiter), opt(char(delimiter)))
                .parse(self.rest);

        // Both halves of the parser are infallible on complete input.
        let (rest, token) = result.ok()?;
        self.rest = rest;

        Some(token)
    }
}

impl FusedIterator for Tokenizer<'_> {}
