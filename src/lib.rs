//! # NMEA 0183 Epoch Decoder
//!
//! This library decodes the GNSS sentences of an NMEA 0183 stream into typed
//! records and publishes them as one consistent snapshot per navigation epoch.
//! Sentences have the format:
//! `$TTSSS,D1,D2,...,Dn*CC\r\n`
//!
//! Supported sentence types are GGA, GLL, GSA, GSV, RMC, VTG and ZDA. Every
//! field of a record is a [`Field`]: a value paired with a presence flag, so a
//! single empty or malformed field never discards the rest of the sentence.
//!
//! The crate is organized in layers:
//! - Framing ([`Frame`]) checks the sentence type, the `*` delimiter and
//!   optionally the checksum ([`ChecksumMode`]), then splits the fields.
//! - Records ([`RmcRecord`], [`GgaRecord`], ...) decode the fields of one
//!   sentence through the [`Parsable`] trait.
//! - [`ConstellationAggregator`] groups GSA and GSV sentences per
//!   constellation and reassembles multi-sentence GSV groups.
//! - [`EpochBuffer`] accumulates raw sentences and, on
//!   [`commit`](EpochBuffer::commit), decodes them into a new
//!   [`EpochSnapshot`].
//!
//! ## Usage
//!
//! ```rust
//! use nmea0183_epoch::EpochBuffer;
//!
//! let mut buffer = EpochBuffer::new();
//! buffer.append("$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A").unwrap();
//! buffer.append("$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K,A*25").unwrap();
//!
//! let snapshot = buffer.commit().unwrap();
//! assert_eq!(snapshot.epoch, 1);
//! assert_eq!(snapshot.rmc.speed_knots.get(), Some(22.4));
//! assert_eq!(snapshot.vtg.speed_kmh.get(), Some(10.2));
//! ```
//!
//! Single sentences can be decoded without a buffer:
//!
//! ```rust
//! use nmea0183_epoch::{GllRecord, Parsable};
//!
//! let gll = GllRecord::parse("$GPGLL,4916.45,N,12311.12,W,225444,A*31").unwrap();
//! let (lat, lon) = gll.decimal_position().unwrap();
//! assert!((lat - 49.274167).abs() < 1e-6);
//! assert!((lon + 123.185333).abs() < 1e-6);
//! ```

mod constellation;
mod distance;
mod epoch;
pub mod error;
mod nmea0183;
mod nmea_content;
mod parse;
pub mod parsing;
mod report;

pub use constellation::*;
pub use distance::*;
pub use epoch::*;
pub use error::{Error, Result};
pub use nmea0183::*;
pub use nmea_content::*;
pub use parse::{Field, FieldDecode};
pub use report::NOT_AVAILABLE;

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;
